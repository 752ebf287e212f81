//! Order history page.

use super::fail;
use crate::context::AppContext;
use crate::{print_info, print_warning};
use anyhow::Result;
use tokoku::utils::{format_order_date, format_rupiah};
use tokoku::OrderViewer;

pub async fn list(ctx: &AppContext) -> Result<()> {
    let mut viewer = OrderViewer::new(ctx.api.clone(), ctx.store.clone());
    let orders = match viewer.load().await {
        Ok(orders) => orders,
        Err(err) => fail(&err),
    };

    if orders.is_empty() {
        print_warning("Belum ada pesanan.");
        return Ok(());
    }

    for order in orders {
        println!(
            "Order #{} — {} — {}",
            order.id,
            format_order_date(order.created_at),
            order.status.label(),
        );
        for item in &order.items {
            println!(
                "    {:<32} Rp {:>12} × {}  (subtotal Rp {})",
                item.product.name,
                format_rupiah(item.price),
                item.quantity,
                format_rupiah(item.subtotal()),
            );
        }
        println!("    Alamat: {}", order.shipping_address);
        println!(
            "    Total Pembayaran: Rp {}",
            format_rupiah(order.total_amount)
        );
        if let Some(action) = OrderViewer::<tokoku::HttpApi, tokoku::FileStore>::pay_action(order) {
            let params = action.params();
            print_info(&format!(
                "Bayar Sekarang: tokoku pay {} {}",
                params.order_id, params.amount
            ));
        }
        println!();
    }
    Ok(())
}
