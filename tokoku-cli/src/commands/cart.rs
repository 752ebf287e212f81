//! Cart page: show, mutate, checkout.

use super::fail;
use crate::cli::{CartRemoveArgs, CartUpdateArgs, CheckoutArgs};
use crate::context::AppContext;
use crate::prompt::{self, StdinConfirm};
use crate::{print_info, print_success, print_warning};
use anyhow::Result;
use tokoku::api::types::Cart;
use tokoku::utils::format_rupiah;
use tokoku::{CartManager, CartMutation, CheckoutFlow, QuantityChange};

fn manager(ctx: &AppContext) -> CartManager<tokoku::HttpApi, tokoku::FileStore, StdinConfirm> {
    CartManager::new(ctx.api.clone(), ctx.store.clone(), StdinConfirm)
}

fn render_cart(cart: &Cart) {
    if cart.is_empty() {
        print_info("Keranjang kosong.");
        return;
    }
    for item in &cart.items {
        println!(
            "  [{}] {:<32} Rp {:>12} × {}  (stok {})",
            item.id,
            item.product.name,
            format_rupiah(item.product.price),
            item.quantity,
            item.product.stock,
        );
    }
    println!("  ----");
    println!("  Jenis barang : {}", cart.total_items);
    println!("  Total barang : {}", cart.total_quantity);
    println!("  Total harga  : Rp {}", format_rupiah(cart.total_price));
}

pub async fn show(ctx: &AppContext) -> Result<()> {
    let mut manager = manager(ctx);
    match manager.load().await {
        Ok(cart) => {
            render_cart(cart);
            Ok(())
        }
        Err(err) => fail(&err),
    }
}

pub async fn update(ctx: &AppContext, args: CartUpdateArgs) -> Result<()> {
    let mut manager = manager(ctx);
    let max_stock = match manager.load().await {
        Ok(cart) => cart
            .items
            .iter()
            .find(|item| item.id == args.item_id)
            .map(|item| item.product.stock)
            .unwrap_or(0),
        Err(err) => fail(&err),
    };

    match manager
        .update_quantity(args.item_id, args.quantity, max_stock)
        .await
    {
        Ok(QuantityChange::Applied) => {
            if let Some(cart) = manager.cart() {
                render_cart(cart);
            }
            Ok(())
        }
        Ok(QuantityChange::OutOfRange) => {
            // Same as a disabled +/- button: nothing happened.
            print_warning("Jumlah di luar batas stok; tidak ada perubahan.");
            Ok(())
        }
        Err(err) => fail(&err),
    }
}

pub async fn remove(ctx: &AppContext, args: CartRemoveArgs) -> Result<()> {
    let mut manager = manager(ctx);
    let name = match manager.load().await {
        Ok(cart) => cart
            .items
            .iter()
            .find(|item| item.id == args.item_id)
            .map(|item| item.product.name.clone())
            .unwrap_or_else(|| format!("item {}", args.item_id)),
        Err(err) => fail(&err),
    };

    match manager.remove_item(args.item_id, &name).await {
        Ok(CartMutation::Done) => {
            print_success("Item dihapus.");
            if let Some(cart) = manager.cart() {
                render_cart(cart);
            }
            Ok(())
        }
        Ok(CartMutation::Cancelled) => Ok(()),
        Err(err) => fail(&err),
    }
}

pub async fn clear(ctx: &AppContext) -> Result<()> {
    let mut manager = manager(ctx);
    if let Err(err) = manager.load().await {
        fail(&err);
    }
    match manager.clear().await {
        Ok(CartMutation::Done) => {
            print_success("Keranjang dikosongkan.");
            Ok(())
        }
        Ok(CartMutation::Cancelled) => Ok(()),
        Err(err) => fail(&err),
    }
}

pub async fn checkout(ctx: &AppContext, args: CheckoutArgs) -> Result<()> {
    let mut manager = manager(ctx);
    let cart = match manager.load().await {
        Ok(cart) => cart.clone(),
        Err(err) => fail(&err),
    };

    let flow = match CheckoutFlow::open(ctx.api.clone(), ctx.store.clone(), &cart) {
        Ok(flow) => flow,
        Err(err) => fail(&err),
    };

    render_cart(&cart);

    let address = match args.address {
        Some(address) => address,
        None => loop {
            let address = prompt::line("Alamat pengiriman")?;
            match CheckoutFlow::<tokoku::HttpApi, tokoku::FileStore>::validate_address(&address) {
                Ok(()) => break address,
                Err(err) => super::report(&err),
            }
        },
    };

    match flow.submit(&address).await {
        Ok(receipt) => {
            print_success(&format!(
                "Pesanan berhasil dibuat! Order ID: {}",
                receipt.order_id
            ));
            print_info(&format!(
                "Total Rp {} — `tokoku orders` untuk melihat pesanan.",
                format_rupiah(receipt.total_amount)
            ));
            if !receipt.cart_cleared {
                print_warning(
                    "Keranjang belum terhapus setelah checkout; `tokoku cart clear` untuk membersihkan.",
                );
            }
            Ok(())
        }
        Err(err) => fail(&err),
    }
}
