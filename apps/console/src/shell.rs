use std::fmt::Write as _;

use peopledesk_application::AccessControlService;
use peopledesk_core::AppResult;
use peopledesk_domain::{Identity, ProfilePatch};
use peopledesk_infrastructure::SeedAccountSummary;

use crate::cli::Command;

const SIGN_IN_HINT: &str = "not signed in; run `peopledesk login <email>`";

/// Runs one shell command against a service that has already been restored.
pub async fn execute(
    service: &AccessControlService,
    accounts: &[SeedAccountSummary],
    command: Command,
) -> AppResult<String> {
    match command {
        Command::Login { email, password } => {
            let identity = service.sign_in(&email, &password).await?;
            let mut output = format!(
                "signed in as {} ({})\n",
                identity.display_name(),
                identity.role()
            );
            output.push_str(&render_navigation(service));
            Ok(output)
        }
        Command::Logout => {
            service.sign_out().await;
            Ok("signed out\n".to_owned())
        }
        Command::Whoami => Ok(service
            .current_identity()
            .map(|identity| render_identity(&identity))
            .unwrap_or_else(|| format!("{SIGN_IN_HINT}\n"))),
        Command::Nav => {
            if service.current_identity().is_none() {
                return Ok(format!("{SIGN_IN_HINT}\n"));
            }
            Ok(render_navigation(service))
        }
        Command::Can { module, capability } => {
            let allowed = match capability.as_deref() {
                Some(capability) => service.has_capability(&module, capability),
                None => service.has_module_access(&module),
            };
            Ok(format!("{}\n", if allowed { "allowed" } else { "denied" }))
        }
        Command::Profile(args) => {
            let patch = ProfilePatch::from(args);
            let identity = service.update_profile(patch).await?;
            Ok(render_identity(&identity))
        }
        Command::Accounts => {
            let mut output = String::new();
            for account in accounts {
                let _ = writeln!(output, "{:<10} {}", account.role, account.email);
            }
            Ok(output)
        }
    }
}

fn render_identity(identity: &Identity) -> String {
    let profile = identity.profile();
    let mut output = String::new();
    let _ = writeln!(output, "name:        {}", identity.display_name());
    let _ = writeln!(output, "email:       {}", identity.email());
    let _ = writeln!(output, "role:        {}", identity.role());
    let _ = writeln!(output, "department:  {}", profile.department);
    let _ = writeln!(output, "position:    {}", profile.position);
    let _ = writeln!(output, "employee id: {}", profile.employee_code);
    if let Some(phone) = profile.phone.as_deref() {
        let _ = writeln!(output, "phone:       {phone}");
    }
    let _ = writeln!(
        output,
        "permissions: {}",
        identity.permissions().iter().collect::<Vec<_>>().join(", ")
    );
    output
}

fn render_navigation(service: &AccessControlService) -> String {
    let mut output = String::new();
    for module in service.accessible_modules() {
        let Some(grant) = service.module_grant(module.as_str()) else {
            continue;
        };
        let capabilities = grant.enabled_capabilities().collect::<Vec<_>>().join(" ");
        let _ = writeln!(
            output,
            "  {:<18} [{}] {}",
            module.label(),
            grant.level(),
            capabilities
        );
    }
    output
}
