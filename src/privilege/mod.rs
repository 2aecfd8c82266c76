//! Privilege escalation.
//!
//! Elevated privileges are validated once per session and cached: the OS
//! broker (sudo) keeps its own timestamp, and the session records that the
//! check passed so repeated calls are no-ops. Every privileged step later
//! in the run (apt, pip, editable installs) rides on that cached grant.

use crate::error::{Result, SetupError};
use crate::session::InstallationSession;
use crate::shell;
use crate::ui::UserInterface;

/// Mockable probes for the escalator.
pub struct PrivilegeContext<'a> {
    /// Whether the process already runs as root.
    pub is_elevated: &'a dyn Fn() -> bool,

    /// Whether the privilege broker has cached credentials (`sudo -n true`).
    pub probe_cached: &'a dyn Fn() -> bool,

    /// Interactively validate credentials (`sudo -v`); true on success.
    pub escalate: &'a dyn Fn() -> bool,
}

/// Build the default `PrivilegeContext` for production use.
pub fn default_context() -> PrivilegeContext<'static> {
    PrivilegeContext {
        is_elevated: &shell::is_elevated,
        probe_cached: &|| shell::execute_check("sudo -n true 2>/dev/null", None),
        escalate: &|| {
            // Inherit stdio so sudo can prompt for a password.
            let options = shell::CommandOptions::default();
            shell::execute("sudo -v", &options)
                .map(|r| r.success)
                .unwrap_or(false)
        },
    }
}

/// Ensure elevated privileges are available for the rest of the session.
///
/// No-op when already cached (either in the session or by the broker) or
/// when running as root. Otherwise asks the user once, then validates via
/// the broker. A declined prompt, a missing terminal, or failed
/// authentication all map to [`SetupError::PrivilegeDenied`].
pub fn ensure_privileges(
    session: &mut InstallationSession,
    ui: &mut dyn UserInterface,
    ctx: &PrivilegeContext<'_>,
) -> Result<()> {
    if session.privileges_cached {
        return Ok(());
    }

    if (ctx.is_elevated)() {
        tracing::debug!("already running as root");
        session.privileges_cached = true;
        return Ok(());
    }

    if (ctx.probe_cached)() {
        tracing::debug!("sudo credentials already cached");
        session.privileges_cached = true;
        return Ok(());
    }

    if !ui.is_interactive() {
        return Err(SetupError::PrivilegeDenied {
            message: "sudo credentials are not cached and no interactive terminal is available"
                .to_string(),
        });
    }

    let consented = ui.confirm(
        "Installing packages requires administrator privileges (sudo). Continue?",
        true,
    )?;
    if !consented {
        return Err(SetupError::PrivilegeDenied {
            message: "declined by user".to_string(),
        });
    }

    if (ctx.escalate)() {
        session.privileges_cached = true;
        Ok(())
    } else {
        Err(SetupError::PrivilegeDenied {
            message: "sudo authentication failed".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Manifest;
    use crate::platform::PlatformProfile;
    use crate::ui::MockUI;
    use std::cell::Cell;
    use std::path::PathBuf;

    fn test_session() -> InstallationSession {
        let profile = PlatformProfile {
            os_family: "linux".to_string(),
            distribution: "ubuntu".to_string(),
            version: "22.04".to_string(),
        };
        InstallationSession::new(profile, &Manifest::default(), PathBuf::from("/tmp/apps"))
    }

    #[test]
    fn root_needs_no_escalation() {
        let mut session = test_session();
        let mut ui = MockUI::new();
        let ctx = PrivilegeContext {
            is_elevated: &|| true,
            probe_cached: &|| false,
            escalate: &|| panic!("should not escalate when already root"),
        };

        ensure_privileges(&mut session, &mut ui, &ctx).unwrap();
        assert!(session.privileges_cached);
    }

    #[test]
    fn broker_cache_short_circuits_prompt() {
        let mut session = test_session();
        let mut ui = MockUI::new();
        let ctx = PrivilegeContext {
            is_elevated: &|| false,
            probe_cached: &|| true,
            escalate: &|| panic!("should not escalate when broker has credentials"),
        };

        ensure_privileges(&mut session, &mut ui, &ctx).unwrap();
        assert!(session.privileges_cached);
    }

    #[test]
    fn repeated_calls_are_no_ops() {
        let mut session = test_session();
        let mut ui = MockUI::interactive();
        ui.set_confirm_response(true);
        let escalations = Cell::new(0u32);
        let ctx = PrivilegeContext {
            is_elevated: &|| false,
            probe_cached: &|| false,
            escalate: &|| {
                escalations.set(escalations.get() + 1);
                true
            },
        };

        ensure_privileges(&mut session, &mut ui, &ctx).unwrap();
        ensure_privileges(&mut session, &mut ui, &ctx).unwrap();
        ensure_privileges(&mut session, &mut ui, &ctx).unwrap();

        assert_eq!(escalations.get(), 1);
    }

    #[test]
    fn declined_prompt_is_privilege_denied() {
        let mut session = test_session();
        let mut ui = MockUI::interactive();
        ui.set_confirm_response(false);
        let ctx = PrivilegeContext {
            is_elevated: &|| false,
            probe_cached: &|| false,
            escalate: &|| panic!("should not escalate after decline"),
        };

        let err = ensure_privileges(&mut session, &mut ui, &ctx).unwrap_err();
        assert!(matches!(err, SetupError::PrivilegeDenied { .. }));
        assert!(!session.privileges_cached);
    }

    #[test]
    fn failed_authentication_is_privilege_denied() {
        let mut session = test_session();
        let mut ui = MockUI::interactive();
        ui.set_confirm_response(true);
        let ctx = PrivilegeContext {
            is_elevated: &|| false,
            probe_cached: &|| false,
            escalate: &|| false,
        };

        let err = ensure_privileges(&mut session, &mut ui, &ctx).unwrap_err();
        assert!(err.to_string().contains("authentication failed"));
    }

    #[test]
    fn non_interactive_without_cache_is_denied() {
        let mut session = test_session();
        let mut ui = MockUI::new(); // non-interactive by default
        let ctx = PrivilegeContext {
            is_elevated: &|| false,
            probe_cached: &|| false,
            escalate: &|| panic!("cannot escalate without a terminal"),
        };

        let err = ensure_privileges(&mut session, &mut ui, &ctx).unwrap_err();
        assert!(err.to_string().contains("no interactive terminal"));
    }
}
