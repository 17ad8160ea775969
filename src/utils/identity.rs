use {
    anyhow::{anyhow, Context, Result},
    std::{env, process::Command},
};

/// Name of the account running the release, used for the push gate.
pub fn current_user() -> Result<String> {
    for var in ["USER", "LOGNAME"] {
        if let Ok(user) = env::var(var) {
            if !user.trim().is_empty() {
                return Ok(user.trim().to_string());
            }
        }
    }

    let output = Command::new("whoami")
        .output()
        .context("failed to run whoami")?;
    if !output.status.success() {
        return Err(anyhow!(
            "failed to determine the current user: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use {super::*, pretty_assertions::assert_eq, serial_test::serial};

    fn restore_env(saved: Vec<(&'static str, Option<String>)>) {
        for (var, value) in saved {
            match value {
                Some(value) => env::set_var(var, value),
                None => env::remove_var(var),
            }
        }
    }

    #[test]
    #[serial]
    fn test_current_user_from_env() {
        let saved = vec![("USER", env::var("USER").ok()), ("LOGNAME", env::var("LOGNAME").ok())];
        let _restore = scopeguard::guard(saved, restore_env);

        env::set_var("USER", "jenkins");
        env::set_var("LOGNAME", "someone-else");
        assert_eq!(current_user().unwrap(), "jenkins");

        env::set_var("USER", "");
        assert_eq!(current_user().unwrap(), "someone-else");
    }
}
