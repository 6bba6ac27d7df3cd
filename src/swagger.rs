use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::customer::list_customers,
        handlers::customer::search_customers,
        handlers::customer::get_customer,
        handlers::customer::create_customer,
        handlers::customer::update_customer,
        handlers::customer::delete_customer,
        handlers::customer::get_profile,
        handlers::customer::update_profile,
        handlers::customer::update_preferences,
        handlers::special_date::list_special_dates,
        handlers::special_date::upcoming,
        handlers::special_date::this_month,
        handlers::special_date::stats,
        handlers::special_date::get_special_date,
        handlers::special_date::create_special_date,
        handlers::special_date::update_special_date,
        handlers::special_date::delete_special_date,
        handlers::event::list_events,
        handlers::event::upcoming_events,
        handlers::event::get_event,
        handlers::event::create_event,
        handlers::event::update_event,
        handlers::event::delete_event,
        handlers::event::book_event,
        handlers::event::list_bookings,
        handlers::event::cancel_booking,
        handlers::offer::list_offers,
        handlers::offer::active_offers,
        handlers::offer::expired_offers,
        handlers::offer::stats,
        handlers::offer::list_usages,
        handlers::offer::get_offer,
        handlers::offer::create_offer,
        handlers::offer::update_offer,
        handlers::offer::delete_offer,
        handlers::offer::use_offer,
        handlers::spin_wheel::get_prizes,
        handlers::spin_wheel::create_prize,
        handlers::spin_wheel::update_prize,
        handlers::spin_wheel::delete_prize,
        handlers::spin_wheel::play,
        handlers::spin_wheel::claim,
        handlers::spin_wheel::stats,
        handlers::spin_wheel::get_records,
        handlers::spin_wheel::played_customers,
        handlers::spin_wheel::available_customers,
        handlers::spin_wheel::session_status,
        handlers::whatsapp::send_message,
        handlers::whatsapp::send_wish,
    ),
    components(
        schemas(
            ApiError,
            CustomerResponse,
            CustomerDetailResponse,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CustomerProfileResponse,
            UpdateCustomerProfileRequest,
            UpdatePreferencesRequest,
            SpecialDateType,
            SpecialDateResponse,
            CreateSpecialDateRequest,
            UpdateSpecialDateRequest,
            SpecialDateStatsResponse,
            EventType,
            BookingStatus,
            EventResponse,
            CreateEventRequest,
            UpdateEventRequest,
            BookEventRequest,
            EventBookingResponse,
            OfferType,
            OfferStatus,
            OfferResponse,
            CreateOfferRequest,
            UpdateOfferRequest,
            UseOfferRequest,
            OfferUsageResponse,
            OfferStatsResponse,
            PrizeResponse,
            CreatePrizeRequest,
            UpdatePrizeRequest,
            PlayRequest,
            WonPrize,
            PlayResultResponse,
            ClaimRequest,
            SpinRecordResponse,
            GameSessionResponse,
            SpinStatsResponse,
            SendMessageRequest,
            SendWishRequest,
            WhatsAppSendResponse,
        )
    ),
    tags(
        (name = "customers", description = "Customer management API"),
        (name = "special_dates", description = "Special dates API"),
        (name = "events", description = "Event and booking API"),
        (name = "offers", description = "Offer management API"),
        (name = "spin_wheel", description = "Spin wheel game API"),
        (name = "whatsapp", description = "WhatsApp messaging API"),
    ),
    info(
        title = "Hotel CRM Backend API",
        version = "1.0.0",
        description = "Hotel CRM Backend REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
