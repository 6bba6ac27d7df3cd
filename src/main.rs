use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use hotel_crm_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::WhatsAppService,
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建外部服务
    let whatsapp_service = WhatsAppService::new(config.whatsapp.clone());
    if config.whatsapp.mock_mode {
        log::warn!("WhatsApp running in mock mode, messages will only be logged");
    }

    // 创建服务
    let customer_service = CustomerService::new(pool.clone());
    let special_date_service = SpecialDateService::new(pool.clone());
    let event_service = EventService::new(pool.clone());
    let offer_service = OfferService::new(pool.clone());
    let spin_wheel_service = SpinWheelService::new(pool.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(special_date_service.clone()))
            .app_data(web::Data::new(event_service.clone()))
            .app_data(web::Data::new(offer_service.clone()))
            .app_data(web::Data::new(spin_wheel_service.clone()))
            .app_data(web::Data::new(whatsapp_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::customer_config)
                    .configure(handlers::special_date_config)
                    .configure(handlers::event_config)
                    .configure(handlers::offer_config)
                    .configure(handlers::spin_wheel_config)
                    .configure(handlers::whatsapp_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
