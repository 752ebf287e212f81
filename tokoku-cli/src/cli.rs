//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tokoku")]
#[command(version)]
#[command(about = "Terminal storefront: cart, checkout, orders, payment", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session
    Login(LoginArgs),

    /// Register a new account
    Register(RegisterArgs),

    /// Drop the persisted session
    Logout,

    /// Show who is currently logged in
    Whoami,

    /// Browse the product catalog
    Products(ProductsArgs),

    /// Show one product with related items
    Product(ProductArgs),

    /// Put a product in the cart
    Add(AddArgs),

    /// Cart operations
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },

    /// Show order history
    Orders,

    /// Pay a pending order
    Pay(PayArgs),

    /// Seller dashboard operations
    Seller {
        #[command(subcommand)]
        action: SellerAction,
    },
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username
    pub username: String,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username (letters, digits, underscore; at least 3 characters)
    pub username: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted when omitted; at least 6 characters)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Full name
    #[arg(long)]
    pub full_name: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Register as a seller
    #[arg(long, default_value = "false")]
    pub seller: bool,
}

#[derive(Args, Debug)]
pub struct ProductsArgs {
    /// Only show this category
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProductArgs {
    /// Product id
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Product id
    pub product_id: i64,

    /// Quantity to add
    #[arg(short, long, default_value = "1")]
    pub quantity: i64,
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart with backend-computed totals
    Show,

    /// Change a line's quantity
    Update(CartUpdateArgs),

    /// Remove a line (asks first)
    Remove(CartRemoveArgs),

    /// Empty the whole cart (asks first)
    Clear,

    /// Create an order from the cart
    Checkout(CheckoutArgs),
}

#[derive(Args, Debug)]
pub struct CartUpdateArgs {
    /// Cart line id
    pub item_id: i64,

    /// New quantity
    pub quantity: i64,
}

#[derive(Args, Debug)]
pub struct CartRemoveArgs {
    /// Cart line id
    pub item_id: i64,
}

#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Shipping address (prompted when omitted; at least 10 characters)
    #[arg(short, long)]
    pub address: Option<String>,
}

#[derive(Args, Debug)]
pub struct PayArgs {
    /// Order id, as carried in the order list's pay action
    pub order_id: String,

    /// Amount due
    pub amount: String,

    /// Payment method code (gopay, ovo, dana, shopeepay, bca, mandiri, bni, cod);
    /// prompted when omitted
    #[arg(short, long)]
    pub method: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long, default_value = "false")]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum SellerAction {
    /// List your products with dashboard stats
    Products,

    /// Create a product
    Create(SellerCreateArgs),

    /// Update a product
    Update(SellerUpdateArgs),

    /// Delete a product (asks first)
    Delete(SellerDeleteArgs),
}

#[derive(Args, Debug)]
pub struct SellerCreateArgs {
    /// Product name
    pub name: String,

    /// Price in rupiah
    #[arg(short, long)]
    pub price: f64,

    /// Initial stock
    #[arg(short, long, default_value = "0")]
    pub stock: i64,

    /// Description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct SellerUpdateArgs {
    /// Product id
    pub id: i64,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New price
    #[arg(long)]
    pub price: Option<f64>,

    /// New stock
    #[arg(long)]
    pub stock: Option<i64>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New category
    #[arg(long)]
    pub category: Option<String>,

    /// New image URL
    #[arg(long)]
    pub image_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct SellerDeleteArgs {
    /// Product id
    pub id: i64,

    /// Product name, shown in the confirmation prompt
    pub name: String,
}
