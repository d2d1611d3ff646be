use exam_notifier_api::Application;
use exam_notifier_infra::{Delivery, InMemoryDelivery, NotifierContext};
use exam_notifier_sdk::NotifierSDK;
use std::sync::Arc;

pub struct TestApp {
    /// Shares its repositories with the running application, used to seed data
    pub ctx: NotifierContext,
    /// Every message the application delivered
    pub delivery: Arc<InMemoryDelivery>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, NotifierSDK, String) {
    let delivery = Arc::new(InMemoryDelivery::new());
    let mut ctx = NotifierContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.delivery_delay_millis = 0;
    ctx.delivery = Delivery::single(delivery.clone());

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        ctx,
        delivery,
    };
    let sdk = NotifierSDK::new(address.clone());
    (app, sdk, address)
}
