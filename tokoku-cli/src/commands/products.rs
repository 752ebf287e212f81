//! Catalog browsing and add-to-cart.

use super::fail;
use crate::cli::{AddArgs, ProductArgs, ProductsArgs};
use crate::context::AppContext;
use crate::{print_info, print_success, print_warning};
use anyhow::Result;
use tokoku::api::types::Product;
use tokoku::utils::format_rupiah;
use tokoku::Catalog;

fn render_product_line(product: &Product) {
    let stock = if product.in_stock() {
        format!("Stok: {}", product.stock)
    } else {
        "Stok habis".to_string()
    };
    println!(
        "  #{:<4} {:<32} Rp {:>12}  {}  [{}]",
        product.id,
        product.name,
        format_rupiah(product.price),
        stock,
        product.category.as_deref().unwrap_or("Uncategorized"),
    );
}

pub async fn list(ctx: &AppContext, args: ProductsArgs) -> Result<()> {
    let catalog = Catalog::new(ctx.api.clone(), ctx.store.clone());
    match catalog.list(args.category.as_deref()).await {
        Ok(products) if products.is_empty() => {
            print_warning("Tidak ada produk.");
            Ok(())
        }
        Ok(products) => {
            for product in &products {
                render_product_line(product);
            }
            Ok(())
        }
        Err(err) => fail(&err),
    }
}

pub async fn detail(ctx: &AppContext, args: ProductArgs) -> Result<()> {
    let catalog = Catalog::new(ctx.api.clone(), ctx.store.clone());
    let product = match catalog.get(args.id).await {
        Ok(product) => product,
        Err(err) => fail(&err),
    };

    println!("{}", product.name);
    println!("  Harga    : Rp {}", format_rupiah(product.price));
    if product.in_stock() {
        println!("  Stok     : {}", product.stock);
    } else {
        println!("  Stok     : Habis");
    }
    println!(
        "  Kategori : {}",
        product.category.as_deref().unwrap_or("Uncategorized")
    );
    println!(
        "  Deskripsi: {}",
        product
            .description
            .as_deref()
            .unwrap_or("Tidak ada deskripsi tersedia.")
    );
    println!("  Penjual  : #{}", product.seller_id);

    match catalog.related(&product).await {
        Ok(related) if !related.is_empty() => {
            print_info("Produk terkait:");
            for product in &related {
                render_product_line(product);
            }
        }
        Ok(_) => {}
        // Related products are decoration; the detail page already rendered.
        Err(err) => print_warning(&format!("Produk terkait gagal dimuat: {}", err)),
    }
    Ok(())
}

pub async fn add_to_cart(ctx: &AppContext, args: AddArgs) -> Result<()> {
    let catalog = Catalog::new(ctx.api.clone(), ctx.store.clone());
    let product = match catalog.get(args.product_id).await {
        Ok(product) => product,
        Err(err) => fail(&err),
    };

    match catalog.add_to_cart(&product, args.quantity).await {
        Ok(item) => {
            print_success(&format!(
                "{} × {} masuk keranjang.",
                item.quantity, product.name
            ));
            Ok(())
        }
        Err(err) => fail(&err),
    }
}
