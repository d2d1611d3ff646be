use crate::error::NotifierError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use exam_notifier_api_structs::get_channel_settings::APIResponse;
use exam_notifier_domain::ChannelSettings;
use exam_notifier_infra::NotifierContext;

fn handle_error(e: UseCaseError) -> NotifierError {
    match e {
        UseCaseError::StorageError => NotifierError::InternalError,
    }
}

pub async fn get_channel_settings_controller(
    ctx: web::Data<NotifierContext>,
) -> Result<HttpResponse, NotifierError> {
    let usecase = GetChannelSettingsUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(handle_error)
}

/// The settings a reminder pass would apply right now. Unlike the pass
/// itself, a store that cannot be read is reported as an error.
#[derive(Debug)]
struct GetChannelSettingsUseCase {}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetChannelSettingsUseCase {
    type Response = ChannelSettings;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.settings.get().await {
            Ok(settings) => Ok(settings.unwrap_or_else(ChannelSettings::fail_open)),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
