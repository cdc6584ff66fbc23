//! Auth commands - login, registration, OTP flows and logout.

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use console::style;
use dialoguer::{Input, Password};

use sb_core::config::AppConfig;
use sb_core::error::{SbError, SbResult};
use sb_models::{Session, UserProfile};
use sb_services::{RegisterOutcome, RegisterProfile};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in with email and password.
    Login {
        /// Account email (prompted when omitted).
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted when omitted).
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account.
    Register {
        /// Full name.
        #[arg(short = 'n', long)]
        name: String,
        /// Account email.
        #[arg(short, long)]
        email: String,
        /// Phone number.
        #[arg(long)]
        phone: Option<String>,
    },
    /// Activate a new account with the emailed code.
    VerifyOtp {
        #[arg(short, long)]
        email: String,
        /// Six-digit code.
        otp: String,
    },
    /// Request a password reset code.
    ForgotPassword {
        #[arg(short, long)]
        email: String,
    },
    /// Set a new password with an emailed reset code.
    ResetPassword {
        #[arg(short, long)]
        email: String,
        /// Six-digit code.
        otp: String,
    },
    /// Sign out and forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami {
        /// Fetch the full profile from the server.
        #[arg(long)]
        remote: bool,
    },
    /// Update the signed-in user's profile. Unset fields keep their current value.
    UpdateProfile {
        /// Full name.
        #[arg(short = 'n', long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        gender: Option<Gender>,
        /// Date of birth (YYYY-MM-DD).
        #[arg(long)]
        birthday: Option<NaiveDate>,
        #[arg(long)]
        avatar: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Wire flag: `true` is male.
    fn as_flag(self) -> bool {
        matches!(self, Gender::Male)
    }
}

pub async fn run(config: AppConfig, action: AuthAction, format: OutputFormat) -> SbResult<()> {
    let ctx = super::AppContext::init(config)?;
    let svc = &ctx.session;

    match action {
        AuthAction::Login { email, password } => {
            let email = match email {
                Some(e) => e,
                None => prompt_text("Email")?,
            };
            let password = match password {
                Some(p) => p,
                None => prompt_password("Password", false)?,
            };

            let pb = super::spinner("Signing in...");
            let result = svc.login(&email, &password).await;
            pb.finish_and_clear();
            let session = result.map_err(super::fail)?;

            match format {
                OutputFormat::Json => super::print_json(&session.user),
                OutputFormat::Text => println!(
                    "  {} Signed in as {} ({}).",
                    style("OK").green().bold(),
                    style(&session.user.full_name).bold(),
                    session.user.email
                ),
            }
        }
        AuthAction::Register { name, email, phone } => {
            let password = prompt_password("Password", true)?;
            let profile = RegisterProfile {
                full_name: name,
                email,
                password,
                phone_number: phone,
            };

            let pb = super::spinner("Creating account...");
            let result = svc.register(&profile).await;
            pb.finish_and_clear();

            match result.map_err(super::fail)? {
                RegisterOutcome::Active(session) => match format {
                    OutputFormat::Json => super::print_json(&serde_json::json!({
                        "status": "active",
                        "user": session.user,
                    })),
                    OutputFormat::Text => println!(
                        "  {} Account created. Signed in as {}.",
                        style("OK").green().bold(),
                        session.user.email
                    ),
                },
                RegisterOutcome::PendingVerification { email, message } => match format {
                    OutputFormat::Json => super::print_json(&serde_json::json!({
                        "status": "pendingVerification",
                        "email": email,
                        "message": message,
                    })),
                    OutputFormat::Text => {
                        println!("  {} {}", style("OK").green().bold(), message);
                        println!("  Activate with `staybook auth verify-otp --email {email} <code>`.");
                    }
                },
            }
        }
        AuthAction::VerifyOtp { email, otp } => {
            let message = svc.verify_otp(&email, &otp).await.map_err(super::fail)?;
            print_ack(&message, format);
        }
        AuthAction::ForgotPassword { email } => {
            let message = svc.forgot_password(&email).await.map_err(super::fail)?;
            print_ack(&message, format);
        }
        AuthAction::ResetPassword { email, otp } => {
            let new_password = prompt_password("New password", true)?;
            let message = svc
                .reset_password(&email, &otp, &new_password)
                .await
                .map_err(super::fail)?;
            print_ack(&message, format);
        }
        AuthAction::Logout => {
            let was = svc.current_session();
            svc.logout().await?;
            match format {
                OutputFormat::Json => super::print_json(&serde_json::json!({ "loggedOut": true })),
                OutputFormat::Text => match was {
                    Some(s) => println!("  {} Signed out {}.", style("OK").green().bold(), s.user.email),
                    None => println!("  Not signed in."),
                },
            }
        }
        AuthAction::Whoami { remote } => {
            let Some(session) = svc.current_session() else {
                match format {
                    OutputFormat::Json => super::print_json(&serde_json::json!({ "state": svc.state().to_string() })),
                    OutputFormat::Text => println!("  Not signed in."),
                }
                return Ok(());
            };

            if remote {
                let user = ctx
                    .api()
                    .get_user(session.user_id())
                    .await
                    .map_err(super::fail)?;
                match format {
                    OutputFormat::Json => super::print_json(&user),
                    OutputFormat::Text => {
                        print_identity(&Session::new(session.token, (&user).into()));
                        println!(
                            "Birthday:  {}",
                            user.date_of_birth
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "-".into())
                        );
                    }
                }
            } else {
                match format {
                    OutputFormat::Json => super::print_json(&session.user),
                    OutputFormat::Text => print_identity(&session),
                }
            }
        }
        AuthAction::UpdateProfile {
            name,
            phone,
            gender,
            birthday,
            avatar,
        } => {
            let session = ctx.require_session()?;
            let api = ctx.api();
            let current = api.get_user(session.user_id()).await.map_err(super::fail)?;

            let phone_number = phone
                .or(current.phone_number)
                .ok_or_else(|| SbError::MissingConfig("phone number. Pass --phone".into()))?;
            let date_of_birth = birthday
                .or(current.date_of_birth)
                .ok_or_else(|| SbError::MissingConfig("date of birth. Pass --birthday".into()))?;
            let profile = UserProfile {
                full_name: name.unwrap_or(current.full_name),
                email: current.email,
                gender: gender
                    .map(Gender::as_flag)
                    .or(current.gender)
                    .unwrap_or(true),
                avatar: avatar.or(current.avatar),
                phone_number,
                date_of_birth,
            };

            let pb = super::spinner("Saving profile...");
            let result = api.update_user(session.user_id(), &profile).await;
            pb.finish_and_clear();
            let user = result.map_err(super::fail)?;

            match format {
                OutputFormat::Json => super::print_json(&user),
                OutputFormat::Text => {
                    println!("  {} Profile updated.", style("OK").green().bold());
                    print_identity(&Session::new(session.token, (&user).into()));
                }
            }
        }
    }

    Ok(())
}

fn print_identity(session: &Session) {
    println!("User:      {} (#{})", style(&session.user.full_name).bold(), session.user_id());
    println!("Email:     {}", session.user.email);
    println!("Phone:     {}", super::cell(session.user.phone_number.as_deref()));
}

fn print_ack(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => super::print_json(&serde_json::json!({ "message": message })),
        OutputFormat::Text => println!("  {} {}", style("OK").green().bold(), message),
    }
}

fn prompt_text(prompt: &str) -> SbResult<String> {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| SbError::Internal(e.to_string()))
}

fn prompt_password(prompt: &str, confirm: bool) -> SbResult<String> {
    let mut input = Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Confirm password", "Passwords do not match");
    }
    input.interact().map_err(|e| SbError::Internal(e.to_string()))
}
