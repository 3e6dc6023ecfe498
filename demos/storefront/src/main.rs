// demos/storefront/src/main.rs

//! Command-line storefront driving the duka checkout core against a
//! remote backend (or the in-memory mock backend, for offline runs).

mod config;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use duka::{
  view, CartLine, CartStore, CheckoutSequencer, FileSlot, HttpBackend, MockOrderItemService, MockOrderService,
  MockPaymentGateway, OrderItemService, OrderService, PaymentGateway, PaymentInitiator, Price, SessionContext,
};

#[derive(Parser)]
#[command(name = "duka-storefront")]
#[command(about = "Headless storefront checkout demo", long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Manage the local cart
  Cart {
    #[command(subcommand)]
    action: CartAction,
  },
  /// Place an order for the current cart, optionally paying by STK push
  Checkout {
    /// Safaricom number to charge (2547XXXXXXXX, 07XXXXXXXX or 01XXXXXXXX)
    #[arg(long)]
    phone: Option<String>,
  },
  /// Send an STK push for an already-placed order
  Pay {
    #[arg(long)]
    order_id: i64,
    /// Safaricom number to charge
    #[arg(long)]
    phone: String,
  },
  /// Operate on a placed order
  Order {
    #[command(subcommand)]
    action: OrderAction,
  },
  /// List the session user's orders
  Orders,
}

#[derive(Subcommand)]
enum CartAction {
  /// Add a product to the cart (adding the same product merges quantities)
  Add {
    #[arg(long)]
    product_id: i64,
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    image: String,
    /// Unit price, snapshotted into the cart
    #[arg(long)]
    price: f64,
    #[arg(long, default_value_t = 1)]
    quantity: u32,
  },
  /// Show the cart with per-line totals
  List,
  /// Remove a product from the cart
  Remove {
    #[arg(long)]
    product_id: i64,
  },
  /// Set a product's quantity (floored at 1)
  Qty {
    #[arg(long)]
    product_id: i64,
    #[arg(long)]
    quantity: i64,
  },
  /// Empty the cart
  Clear,
}

#[derive(Subcommand)]
enum OrderAction {
  /// Delete a placed order (the cart is not touched)
  Delete {
    #[arg(long)]
    order_id: i64,
  },
}

struct Services {
  orders: Arc<dyn OrderService>,
  items: Arc<dyn OrderItemService>,
  gateway: Arc<dyn PaymentGateway>,
}

fn build_services(config: &AppConfig) -> Result<Services> {
  if config.mock_backend {
    // The mock tables live for one invocation only; use `checkout --phone`
    // to exercise the whole flow in a single run.
    info!("using in-memory mock backend");
    return Ok(Services {
      orders: Arc::new(MockOrderService::new()),
      items: Arc::new(MockOrderItemService::new()),
      gateway: Arc::new(MockPaymentGateway::new()),
    });
  }

  let session = match &config.auth_token {
    Some(token) => SessionContext::with_token(config.user_id, token.clone()),
    None => SessionContext::new(config.user_id),
  };
  let backend = Arc::new(HttpBackend::new(config.api_base_url.clone(), session)?);
  Ok(Services {
    orders: backend.clone(),
    items: backend.clone(),
    gateway: backend,
  })
}

fn cart_store(config: &AppConfig) -> CartStore {
  CartStore::new(Arc::new(FileSlot::new(&config.cart_path)))
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let cli = Cli::parse();
  let config = AppConfig::from_env()?;

  match cli.command {
    Commands::Cart { action } => run_cart(&config, action),
    Commands::Checkout { phone } => run_checkout(&config, phone).await,
    Commands::Pay { order_id, phone } => run_pay(&config, order_id, &phone).await,
    Commands::Order {
      action: OrderAction::Delete { order_id },
    } => run_delete_order(&config, order_id).await,
    Commands::Orders => run_list_orders(&config).await,
  }
}

fn run_cart(config: &AppConfig, action: CartAction) -> Result<()> {
  let store = cart_store(config);

  match action {
    CartAction::Add {
      product_id,
      title,
      image,
      price,
      quantity,
    } => {
      store.add_to_cart(CartLine {
        product_id,
        title: title.clone(),
        image,
        price: Price::new(price),
        quantity,
      })?;
      println!("Added {quantity} x {title} to the cart.");
    }
    CartAction::List => {
      let cart = store.get_cart();
      if cart.is_empty() {
        println!("Cart is empty.");
        return Ok(());
      }
      for line in &cart {
        println!(
          "{:>4} x {:<32} @ Ksh {:>10}  = Ksh {:>10.2}  (product {})",
          line.quantity,
          line.title,
          line.price,
          view::line_total(line),
          line.product_id
        );
      }
      println!(
        "{} item(s), subtotal Ksh {:.2}",
        view::total_item_count(&cart),
        view::subtotal(&cart)
      );
    }
    CartAction::Remove { product_id } => {
      store.remove_from_cart(product_id)?;
      println!("Removed product {product_id} from the cart.");
    }
    CartAction::Qty {
      product_id,
      quantity,
    } => {
      store.update_quantity(product_id, quantity)?;
      println!("Updated quantity for product {product_id}.");
    }
    CartAction::Clear => {
      store.clear_cart()?;
      println!("Cart cleared.");
    }
  }
  Ok(())
}

async fn run_checkout(config: &AppConfig, phone: Option<String>) -> Result<()> {
  let services = build_services(config)?;
  let store = cart_store(config);
  let cart = store.get_cart();
  let total = view::subtotal(&cart);

  let sequencer = CheckoutSequencer::new(services.orders.clone(), services.items.clone());
  let order_id = sequencer.create_order(config.user_id, &cart).await?;
  println!("Order #{order_id} placed, total Ksh {total:.2}.");

  match phone {
    Some(phone) => initiate_payment(&services, &store, order_id, &phone, total).await,
    None => {
      println!("Pay with: pay --order-id {order_id} --phone <number>");
      println!("Discard with: order delete --order-id {order_id}");
      Ok(())
    }
  }
}

async fn run_pay(config: &AppConfig, order_id: i64, phone: &str) -> Result<()> {
  let services = build_services(config)?;
  let store = cart_store(config);

  // The order's own total is authoritative for the charge amount.
  let order = services.orders.order(order_id).await?;
  initiate_payment(&services, &store, order_id, phone, order.total_amount.get()).await
}

async fn initiate_payment(
  services: &Services,
  store: &CartStore,
  order_id: i64,
  phone: &str,
  amount: f64,
) -> Result<()> {
  let initiator = PaymentInitiator::new(services.gateway.clone());
  match initiator.initiate(order_id, phone, amount).await {
    Ok(response) => {
      println!("STK push sent: {}", response.customer_message);
      // The cart is cleared only once the gateway accepts the push, never
      // at order-creation time.
      store.clear_cart()?;
      println!("Cart cleared. Confirm the payment on your phone.");
      Ok(())
    }
    Err(e) => {
      bail!(
        "payment for order #{order_id} failed: {e}. The order is still placed; \
         retry with `pay --order-id {order_id} --phone <number>` or discard it \
         with `order delete --order-id {order_id}`."
      );
    }
  }
}

async fn run_delete_order(config: &AppConfig, order_id: i64) -> Result<()> {
  let services = build_services(config)?;
  services.orders.delete_order(order_id).await?;
  println!("Order #{order_id} deleted. The cart was left untouched.");
  Ok(())
}

async fn run_list_orders(config: &AppConfig) -> Result<()> {
  let services = build_services(config)?;
  let orders = services.orders.orders_for_user(config.user_id).await?;

  if orders.is_empty() {
    println!("No orders for user {}.", config.user_id);
    return Ok(());
  }
  for order in &orders {
    println!(
      "#{:<8} Ksh {:>10}  {:<10} {}",
      order.order_id,
      order.total_amount,
      format!("{:?}", order.status).to_lowercase(),
      order
        .created_at
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
    );
  }
  Ok(())
}
