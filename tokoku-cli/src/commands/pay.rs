//! Payment page: countdown, method selection, simulated processing.

use super::fail;
use crate::cli::PayArgs;
use crate::context::AppContext;
use crate::prompt;
use crate::{print_error, print_info, print_success, print_warning};
use anyhow::Result;
use chrono::Utc;
use tokoku::payment::{MethodKind, Tick};
use tokoku::utils::format_rupiah;
use tokoku::{PaymentMethod, PaymentPage, PaymentParams};

fn render_methods() {
    print_info("Metode pembayaran:");
    let mut last_kind: Option<MethodKind> = None;
    for (i, method) in PaymentMethod::ALL.iter().enumerate() {
        if last_kind != Some(method.kind()) {
            last_kind = Some(method.kind());
            let heading = match method.kind() {
                MethodKind::EWallet => "E-Wallet",
                MethodKind::BankTransfer => "Transfer Bank",
                MethodKind::CashOnDelivery => "Lainnya",
            };
            println!("  {}", heading);
        }
        println!("    {}. {:<10} — {}", i + 1, method.code(), method);
    }
}

fn pick_method(preset: Option<&str>) -> Result<PaymentMethod> {
    if let Some(code) = preset {
        return match code.parse::<PaymentMethod>() {
            Ok(method) => Ok(method),
            Err(e) => {
                print_error(&e.to_string());
                std::process::exit(1);
            }
        };
    }

    render_methods();
    loop {
        let answer = prompt::line("Pilih metode (kode)")?;
        match answer.parse::<PaymentMethod>() {
            Ok(method) => return Ok(method),
            Err(_) => print_warning("Silakan pilih metode pembayaran!"),
        }
    }
}

pub async fn run(ctx: &AppContext, args: PayArgs) -> Result<()> {
    let params = PaymentParams {
        order_id: args.order_id,
        amount: args.amount,
    };

    let mut page = match PaymentPage::open(
        ctx.api.clone(),
        ctx.store.clone(),
        &params,
        &ctx.config.payment,
    )
    .await
    {
        Ok(page) => page,
        Err(err) => {
            // Invalid entry bounces back to the order list.
            super::report(&err);
            print_info("Kembali ke daftar pesanan: tokoku orders");
            std::process::exit(1);
        }
    };

    println!("Order    : #{}", page.order_id());
    println!("Total    : Rp {}", format_rupiah(page.amount()));

    match page.tick(Utc::now()) {
        Some(Tick::Remaining { .. }) => {
            println!("Sisa waktu: {}", page.countdown().display(Utc::now()));
        }
        Some(Tick::JustExpired) | Some(Tick::Expired) => {
            print_error("Waktu pembayaran telah habis!");
            std::process::exit(1);
        }
        None => {}
    }

    let method = pick_method(args.method.as_deref())?;
    if let Err(err) = page.select_method(method) {
        fail(&err);
    }

    let label = page.pay_label().unwrap_or_else(|| "Bayar".to_string());
    if !args.yes && !prompt::yes_no(&format!("{}?", label)) {
        print_info("Pembayaran dibatalkan.");
        return Ok(());
    }

    print_info("Memproses Pembayaran... Mohon tunggu sebentar.");
    match page.submit().await {
        Ok(receipt) => {
            print_success("Pembayaran Berhasil! Pesanan Anda sedang diproses.");
            println!("  Order ID : #{}", receipt.order_id);
            println!("  Total    : Rp {}", format_rupiah(receipt.amount));
            println!("  Metode   : {}", receipt.method);
            print_info("Lihat pesanan: tokoku orders");
            Ok(())
        }
        Err(err) => {
            // The attempt re-armed with the same method; a re-run retries.
            super::report(&err);
            std::process::exit(1);
        }
    }
}
