mod attempt;
mod enrollment;
mod identity;
mod notification;
mod pending;
mod report;
mod settings;
mod shared;
mod student;
mod subscription;
mod urgency;

pub use attempt::{Attempt, AttemptIndex};
pub use enrollment::{Enrollment, EnrollmentQuery};
pub use identity::Identity;
pub use notification::{
    exam_access_url, format_deadline, EmailTemplate, NotificationKind, NotificationLog, PushData,
    SmsTemplate, TemplateVars,
};
pub use pending::{PendingAssignment, PendingTestsAggregator};
pub use report::{ChannelCounts, DeliveryError, ReminderPassReport};
pub use settings::{Channel, ChannelSettings, InvalidChannelError};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use student::{Student, User};
pub use subscription::{tokens_by_provider, PushProvider, Subscription, UnknownPushProviderError};
pub use test::Test;
pub use urgency::{ReminderMessage, Urgency, UrgencyTier};
