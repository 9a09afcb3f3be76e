pub mod gate_const {
    pub const USER_TABLE: &str = "users";
    pub const STUDENT_TABLE: &str = "students";
    pub const INVITE_TABLE: &str = "invites";
    pub const CR_REQUEST_TABLE: &str = "cr_requests";
    pub const AUDIT_LOG_TABLE: &str = "audit_logs";
    pub const EMAIL_OUTBOX_TABLE: &str = "email_outbox";

    pub const DEFAULT_INVITE_TTL_DAYS: i64 = 7;
    pub const INVITE_LIST_LIMIT: i64 = 100;
    pub const DEFAULT_DRAIN_LIMIT: i64 = 50;
}
