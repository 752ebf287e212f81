//! Seller dashboard: product management and stats.

use super::fail;
use crate::cli::{SellerCreateArgs, SellerDeleteArgs, SellerUpdateArgs};
use crate::context::AppContext;
use crate::prompt::StdinConfirm;
use crate::{print_info, print_success, print_warning};
use anyhow::Result;
use tokoku::api::types::{NewProduct, ProductPatch};
use tokoku::utils::format_rupiah;
use tokoku::{DashboardStats, SellerDashboard};

fn dashboard(
    ctx: &AppContext,
) -> SellerDashboard<tokoku::HttpApi, tokoku::FileStore, StdinConfirm> {
    SellerDashboard::new(ctx.api.clone(), ctx.store.clone(), StdinConfirm)
}

pub async fn products(ctx: &AppContext) -> Result<()> {
    let dashboard = dashboard(ctx);
    let products = match dashboard.my_products().await {
        Ok(products) => products,
        Err(err) => fail(&err),
    };

    if products.is_empty() {
        print_warning("Belum ada produk.");
    }
    for product in &products {
        println!(
            "  #{:<4} {:<32} Rp {:>12}  stok {}",
            product.id,
            product.name,
            format_rupiah(product.price),
            product.stock,
        );
    }

    let stats = DashboardStats::from_products(&products);
    print_info(&format!(
        "{} produk, total stok {}, nilai Rp {}",
        stats.total_products,
        stats.total_stock,
        format_rupiah(stats.total_value)
    ));
    Ok(())
}

pub async fn create(ctx: &AppContext, args: SellerCreateArgs) -> Result<()> {
    let dashboard = dashboard(ctx);
    let product = NewProduct {
        name: args.name,
        description: args.description,
        price: args.price,
        stock: args.stock,
        image_url: args.image_url,
        category: args.category,
    };

    match dashboard.create(product).await {
        Ok(created) => {
            print_success(&format!("Produk #{} dibuat: {}", created.id, created.name));
            Ok(())
        }
        Err(err) => fail(&err),
    }
}

pub async fn update(ctx: &AppContext, args: SellerUpdateArgs) -> Result<()> {
    let dashboard = dashboard(ctx);
    let patch = ProductPatch {
        name: args.name,
        description: args.description,
        price: args.price,
        stock: args.stock,
        image_url: args.image_url,
        category: args.category,
    };

    match dashboard.update(args.id, patch).await {
        Ok(updated) => {
            print_success(&format!("Produk #{} diperbarui.", updated.id));
            Ok(())
        }
        Err(err) => fail(&err),
    }
}

pub async fn delete(ctx: &AppContext, args: SellerDeleteArgs) -> Result<()> {
    let dashboard = dashboard(ctx);
    match dashboard.delete(args.id, &args.name).await {
        Ok(true) => {
            print_success("Produk dihapus.");
            Ok(())
        }
        Ok(false) => Ok(()),
        Err(err) => fail(&err),
    }
}
