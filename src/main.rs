mod telemetry;

use exam_notifier_api::Application;
use exam_notifier_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};
use tracing::error;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("exam_notifier_server".into(), "info".into());
    init_subscriber(subscriber);

    if let Err(e) = run_migration().await {
        error!("Unable to run database migrations. Error: {:?}", e);
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "Unable to run database migrations",
        ));
    }

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
