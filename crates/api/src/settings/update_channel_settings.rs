use crate::error::NotifierError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use exam_notifier_api_structs::update_channel_settings::{APIResponse, RequestBody};
use exam_notifier_domain::ChannelSettings;
use exam_notifier_infra::NotifierContext;

fn handle_error(e: UseCaseError) -> NotifierError {
    match e {
        UseCaseError::StorageError => NotifierError::InternalError,
    }
}

pub async fn update_channel_settings_controller(
    ctx: web::Data<NotifierContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, NotifierError> {
    let usecase = UpdateChannelSettingsUseCase {
        push_enabled: body.push_enabled,
        sms_enabled: body.sms_enabled,
        mail_enabled: body.mail_enabled,
    };

    execute(usecase, &ctx)
        .await
        .map(|settings| HttpResponse::Ok().json(APIResponse::new(settings)))
        .map_err(handle_error)
}

#[derive(Debug)]
struct UpdateChannelSettingsUseCase {
    pub push_enabled: Option<bool>,
    pub sms_enabled: Option<bool>,
    pub mail_enabled: Option<bool>,
}

#[derive(Debug)]
enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateChannelSettingsUseCase {
    type Response = ChannelSettings;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Errors> {
        let mut settings = match ctx.repos.settings.get().await {
            Ok(settings) => settings.unwrap_or_else(ChannelSettings::fail_open),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        if let Some(push_enabled) = self.push_enabled {
            settings.push_enabled = push_enabled;
        }
        if let Some(sms_enabled) = self.sms_enabled {
            settings.sms_enabled = sms_enabled;
        }
        if let Some(mail_enabled) = self.mail_enabled {
            settings.mail_enabled = mail_enabled;
        }

        ctx.repos
            .settings
            .save(&settings)
            .await
            .map(|_| settings)
            .map_err(|_| UseCaseError::StorageError)
    }
}
