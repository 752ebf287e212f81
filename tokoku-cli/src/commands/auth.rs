//! Login, registration, logout, whoami.

use super::fail;
use crate::cli::{LoginArgs, RegisterArgs};
use crate::context::AppContext;
use crate::{print_info, print_success};
use crate::prompt;
use anyhow::Result;
use tokoku::api::types::RegisterUser;
use tokoku::AuthFlow;

pub async fn login(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt::line("Password")?,
    };

    let flow = AuthFlow::new(ctx.api.clone(), ctx.store.clone());
    match flow.login(&args.username, &password).await {
        Ok(session) => {
            print_success(&format!(
                "Selamat datang, {}!",
                session.user().display_name()
            ));
            if session.is_seller() {
                print_info("Akun seller: `tokoku seller products` membuka dashboard Anda.");
            }
            Ok(())
        }
        Err(err) => fail(&err),
    }
}

pub async fn register(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt::line("Password")?,
    };

    let flow = AuthFlow::new(ctx.api.clone(), ctx.store.clone());
    let user = RegisterUser {
        email: args.email,
        username: args.username,
        password,
        full_name: args.full_name,
        phone: args.phone,
        is_seller: args.seller,
    };

    match flow.register(user).await {
        Ok(profile) => {
            print_success(&format!(
                "Register berhasil! Silakan login sebagai {}.",
                profile.username
            ));
            Ok(())
        }
        Err(err) => fail(&err),
    }
}

pub async fn logout(ctx: &AppContext) -> Result<()> {
    let flow = AuthFlow::new(ctx.api.clone(), ctx.store.clone());
    match flow.logout().await {
        Ok(()) => {
            print_success("Logout berhasil.");
            Ok(())
        }
        Err(err) => fail(&err),
    }
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    let flow = AuthFlow::new(ctx.api.clone(), ctx.store.clone());
    match flow.current().await {
        Ok(Some(session)) => {
            let user = session.user();
            print_info(&format!(
                "{} ({}){}",
                user.display_name(),
                user.email,
                if user.is_seller { " — seller" } else { "" }
            ));
            Ok(())
        }
        Ok(None) => {
            print_info("Belum login.");
            Ok(())
        }
        Err(err) => fail(&err),
    }
}
