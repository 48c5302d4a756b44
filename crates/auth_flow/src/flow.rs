//! Stage machines for the credential flows. Transitions are linear and
//! forward, with one explicit back transition that drops code state and
//! timers. The machines hold no network handles; route code performs the
//! calls and reports outcomes back.

use gateway_client::Error;

use crate::code::CodeBuffer;
use crate::cooldown::ResendCooldown;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginStage {
    #[default]
    Credentials,
    Verification,
    Success,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginAdvance {
    /// Device already trusted; the session cookie is set.
    Complete,
    /// A one-time code was sent; collect it before the session is usable.
    VerificationRequired,
}

/// Login flow: credentials, then (for unrecognized devices) a 6-digit code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginFlow {
    stage: LoginStage,
    code: CodeBuffer,
    cooldown: ResendCooldown,
    pending_fingerprint: Option<String>,
}

impl LoginFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> LoginStage {
        self.stage
    }

    pub fn code(&self) -> &CodeBuffer {
        &self.code
    }

    pub fn code_mut(&mut self) -> &mut CodeBuffer {
        &mut self.code
    }

    pub fn cooldown(&self) -> ResendCooldown {
        self.cooldown
    }

    /// Fingerprint submitted with the credentials, kept for the device
    /// verification fallback.
    pub fn pending_fingerprint(&self) -> Option<&str> {
        self.pending_fingerprint.as_deref()
    }

    /// Credentials were accepted by the backend. Either the device is
    /// trusted and the flow completes, or a code was sent and the flow
    /// enters verification with a fresh code buffer and cooldown.
    pub fn credentials_accepted(
        &mut self,
        requires_verification: bool,
        fingerprint: String,
    ) -> LoginAdvance {
        if requires_verification {
            self.stage = LoginStage::Verification;
            self.pending_fingerprint = Some(fingerprint);
            self.code.clear();
            self.cooldown.start();
            LoginAdvance::VerificationRequired
        } else {
            self.stage = LoginStage::Success;
            self.pending_fingerprint = Some(fingerprint);
            LoginAdvance::Complete
        }
    }

    /// Verify is enabled exactly when all six digits are present.
    pub fn can_verify(&self) -> bool {
        self.stage == LoginStage::Verification && self.code.is_complete()
    }

    pub fn verification_succeeded(&mut self) {
        self.stage = LoginStage::Success;
    }

    pub fn can_resend(&self) -> bool {
        self.stage == LoginStage::Verification && !self.cooldown.is_active()
    }

    /// A resend was issued: the stale code is dropped and the cooldown
    /// restarts at the full window.
    pub fn resend_issued(&mut self) {
        self.code.clear();
        self.cooldown.start();
    }

    /// One-second cooldown tick; returns the seconds remaining.
    pub fn tick(&mut self) -> u32 {
        self.cooldown.tick()
    }

    /// Back to the credentials form, dropping code state and timers.
    pub fn back_to_credentials(&mut self) {
        self.stage = LoginStage::Credentials;
        self.code.clear();
        self.cooldown.reset();
        self.pending_fingerprint = None;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignupStage {
    #[default]
    Form,
    Verification,
    Payment,
}

/// Signup flow: account form, email verification, then plan selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupFlow {
    stage: SignupStage,
    code: CodeBuffer,
    cooldown: ResendCooldown,
}

impl SignupFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> SignupStage {
        self.stage
    }

    pub fn code(&self) -> &CodeBuffer {
        &self.code
    }

    pub fn code_mut(&mut self) -> &mut CodeBuffer {
        &mut self.code
    }

    pub fn cooldown(&self) -> ResendCooldown {
        self.cooldown
    }

    /// The account was created; a verification code is on its way.
    pub fn form_accepted(&mut self) {
        self.stage = SignupStage::Verification;
        self.code.clear();
        self.cooldown.start();
    }

    pub fn can_verify(&self) -> bool {
        self.stage == SignupStage::Verification && self.code.is_complete()
    }

    pub fn verification_succeeded(&mut self) {
        self.stage = SignupStage::Payment;
    }

    pub fn can_resend(&self) -> bool {
        self.stage == SignupStage::Verification && !self.cooldown.is_active()
    }

    pub fn resend_issued(&mut self) {
        self.code.clear();
        self.cooldown.start();
    }

    pub fn tick(&mut self) -> u32 {
        self.cooldown.tick()
    }

    pub fn back_to_form(&mut self) {
        self.stage = SignupStage::Form;
        self.code.clear();
        self.cooldown.reset();
    }
}

/// Access to a flow's code buffer, so one input component can serve both
/// the login and signup flows.
pub trait CodeEntry {
    fn entry(&self) -> &CodeBuffer;
    fn entry_mut(&mut self) -> &mut CodeBuffer;
}

impl CodeEntry for LoginFlow {
    fn entry(&self) -> &CodeBuffer {
        &self.code
    }

    fn entry_mut(&mut self) -> &mut CodeBuffer {
        &mut self.code
    }
}

impl CodeEntry for SignupFlow {
    fn entry(&self) -> &CodeBuffer {
        &self.code
    }

    fn entry_mut(&mut self) -> &mut CodeBuffer {
        &mut self.code
    }
}

/// Two-endpoint disambiguation: when email verification reports that no
/// verification record exists, the account is already verified and this is
/// really a new-device check, so the same code goes to the device endpoint.
pub fn should_try_device_verification(error: &Error) -> bool {
    error.is_verification_not_found()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_client::error_from_response;

    #[test]
    fn trusted_device_completes_without_verification() {
        let mut flow = LoginFlow::new();
        let advance = flow.credentials_accepted(false, "fp01".to_string());
        assert_eq!(advance, LoginAdvance::Complete);
        assert_eq!(flow.stage(), LoginStage::Success);
        assert!(!flow.cooldown().is_active());
    }

    #[test]
    fn unrecognized_device_enters_verification_with_fresh_state() {
        let mut flow = LoginFlow::new();
        flow.code_mut().paste(0, "999999");

        let advance = flow.credentials_accepted(true, "fp01".to_string());
        assert_eq!(advance, LoginAdvance::VerificationRequired);
        assert_eq!(flow.stage(), LoginStage::Verification);
        assert_eq!(flow.pending_fingerprint(), Some("fp01"));
        assert_eq!(flow.code().code(), "");
        assert_eq!(flow.cooldown().remaining(), 60);
    }

    #[test]
    fn verify_is_gated_on_a_complete_code() {
        let mut flow = LoginFlow::new();
        flow.credentials_accepted(true, "fp01".to_string());
        assert!(!flow.can_verify());

        flow.code_mut().paste(0, "12345");
        assert!(!flow.can_verify());

        flow.code_mut().set_digit(5, "6");
        assert!(flow.can_verify());
    }

    #[test]
    fn resend_is_blocked_until_the_cooldown_drains() {
        let mut flow = LoginFlow::new();
        flow.credentials_accepted(true, "fp01".to_string());
        assert!(!flow.can_resend());

        for _ in 0..59 {
            flow.tick();
        }
        assert!(!flow.can_resend());
        flow.tick();
        assert!(flow.can_resend());

        flow.code_mut().paste(0, "123456");
        flow.resend_issued();
        assert_eq!(flow.code().code(), "");
        assert_eq!(flow.cooldown().remaining(), 60);
        assert!(!flow.can_resend());
    }

    #[test]
    fn back_transition_clears_code_and_timers() {
        let mut flow = LoginFlow::new();
        flow.credentials_accepted(true, "fp01".to_string());
        flow.code_mut().paste(0, "123456");

        flow.back_to_credentials();
        assert_eq!(flow.stage(), LoginStage::Credentials);
        assert_eq!(flow.code().code(), "");
        assert!(!flow.cooldown().is_active());
        assert!(flow.pending_fingerprint().is_none());
    }

    #[test]
    fn signup_runs_form_verification_payment() {
        let mut flow = SignupFlow::new();
        assert_eq!(flow.stage(), SignupStage::Form);

        flow.form_accepted();
        assert_eq!(flow.stage(), SignupStage::Verification);
        assert_eq!(flow.cooldown().remaining(), 60);

        flow.code_mut().paste(0, "654321");
        assert!(flow.can_verify());
        flow.verification_succeeded();
        assert_eq!(flow.stage(), SignupStage::Payment);
    }

    #[test]
    fn device_fallback_triggers_on_missing_verification_record() {
        let missing = error_from_response(404, r#"{"error":"verification record was not found"}"#);
        assert!(should_try_device_verification(&missing));

        let expired =
            error_from_response(400, r#"{"error":"code expired","code":"VERIFICATION_EXPIRED"}"#);
        assert!(!should_try_device_verification(&expired));

        let wrong = error_from_response(400, r#"{"error":"invalid code"}"#);
        assert!(!should_try_device_verification(&wrong));
    }
}
