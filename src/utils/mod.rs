pub mod ids;
pub mod jwt;
pub mod mailer;
pub mod permission_context;
pub mod scope;
pub mod time;
pub mod token;
pub mod validated_form;
