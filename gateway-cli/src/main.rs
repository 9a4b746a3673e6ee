//! Gateway CLI
//!
//! Command-line interface for the Stripe gateway API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use gateway_client::GatewayClient;
use gateway_types::{
    CreateChargeRequest, CreateCustomerRequest, CreatePaymentIntentRequest, CreatePriceRequest,
    CreateProductRequest, CreateRefundRequest, CreateSubscriptionRequest, UpdateProductRequest,
};

#[derive(Parser)]
#[command(name = "gateway")]
#[command(author, version, about = "Stripe gateway CLI client", long_about = None)]
struct Cli {
    /// Base URL of the gateway API
    #[arg(long, env = "GATEWAY_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer operations
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Product operations
    Product {
        #[command(subcommand)]
        action: ProductCommands,
    },
    /// Price operations
    Price {
        #[command(subcommand)]
        action: PriceCommands,
    },
    /// Subscription operations
    Subscription {
        #[command(subcommand)]
        action: SubscriptionCommands,
    },
    /// Check gateway health
    Health,
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Create a new customer
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Look a customer up by email
    Get {
        email: String,
    },
    /// List all customers
    List,
    /// Delete a customer
    Delete {
        /// Customer ID
        id: String,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Create and confirm a payment intent
    Intent {
        /// Amount in the smallest currency unit
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "usd")]
        currency: String,
        #[arg(long)]
        payment_method: String,
        #[arg(long)]
        customer: Option<String>,
    },
    /// Retrieve a payment intent
    GetIntent {
        id: String,
    },
    /// Create a charge from a token or source
    Charge {
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "usd")]
        currency: String,
        #[arg(long)]
        source: String,
    },
    /// Refund a charge
    Refund {
        #[arg(long)]
        charge: String,
        /// Partial amount; refunds the full charge when omitted
        #[arg(long)]
        amount: Option<i64>,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Retrieve a product
    Get {
        id: String,
    },
    /// Rename a product
    Rename {
        id: String,
        #[arg(long)]
        name: String,
    },
    /// List products
    List,
    /// Delete a product
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum PriceCommands {
    /// Create a price
    Create {
        /// Amount in the smallest currency unit
        #[arg(long)]
        unit_amount: i64,
        #[arg(long, default_value = "usd")]
        currency: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        nickname: Option<String>,
    },
    /// Retrieve a price
    Get {
        id: String,
    },
    /// List prices, optionally for one product
    List {
        #[arg(long)]
        product: Option<String>,
    },
    /// Deactivate a price
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum SubscriptionCommands {
    /// Subscribe a customer to a price
    Create {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        trial_days: Option<u32>,
    },
    /// Retrieve a subscription
    Get {
        id: String,
    },
    /// List subscriptions, optionally for one customer
    List {
        #[arg(long)]
        customer: Option<String>,
    },
    /// Cancel a subscription
    Cancel {
        id: String,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway_types::MessageResponse;

    #[test]
    fn test_print_json_accepts_dtos_and_values() {
        let message = MessageResponse {
            message: "Customer deleted successfully".to_string(),
        };
        assert!(print_json(&message).is_ok());

        let raw = serde_json::json!({"id": "cus_1"});
        assert!(print_json(&raw).is_ok());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = GatewayClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ Gateway is healthy");
            } else {
                println!("✗ Gateway is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Customer { action } => match action {
            CustomerCommands::Create { email, name, phone } => {
                let created = client
                    .create_customer(&CreateCustomerRequest {
                        email,
                        name,
                        phone,
                        metadata: Default::default(),
                    })
                    .await?;
                print_json(&created)?;
            }
            CustomerCommands::Get { email } => {
                print_json(&client.get_customer_by_email(&email).await?)?;
            }
            CustomerCommands::List => {
                print_json(&client.list_customers().await?)?;
            }
            CustomerCommands::Delete { id } => {
                print_json(&client.delete_customer(&id).await?)?;
            }
        },

        Commands::Payment { action } => match action {
            PaymentCommands::Intent {
                amount,
                currency,
                payment_method,
                customer,
            } => {
                let intent = client
                    .create_payment_intent(&CreatePaymentIntentRequest {
                        amount,
                        currency,
                        payment_method,
                        confirm: true,
                        customer,
                        receipt_email: None,
                        description: None,
                        metadata: None,
                    })
                    .await?;
                print_json(&intent)?;
            }
            PaymentCommands::GetIntent { id } => {
                print_json(&client.retrieve_payment_intent(&id).await?)?;
            }
            PaymentCommands::Charge {
                amount,
                currency,
                source,
            } => {
                let charge = client
                    .create_charge(&CreateChargeRequest {
                        amount,
                        currency,
                        source,
                        customer: None,
                        description: None,
                        metadata: None,
                    })
                    .await?;
                print_json(&charge)?;
            }
            PaymentCommands::Refund { charge, amount } => {
                let refund = client
                    .create_refund(&CreateRefundRequest {
                        charge,
                        amount,
                        reason: None,
                        metadata: None,
                    })
                    .await?;
                print_json(&refund)?;
            }
        },

        Commands::Product { action } => match action {
            ProductCommands::Create { name, description } => {
                let product = client
                    .create_product(&CreateProductRequest {
                        name,
                        description,
                        metadata: None,
                    })
                    .await?;
                print_json(&product)?;
            }
            ProductCommands::Get { id } => {
                print_json(&client.retrieve_product(&id).await?)?;
            }
            ProductCommands::Rename { id, name } => {
                let product = client
                    .update_product(
                        &id,
                        &UpdateProductRequest {
                            name: Some(name),
                            ..Default::default()
                        },
                    )
                    .await?;
                print_json(&product)?;
            }
            ProductCommands::List => {
                print_json(&client.list_products().await?)?;
            }
            ProductCommands::Delete { id } => {
                print_json(&client.delete_product(&id).await?)?;
            }
        },

        Commands::Price { action } => match action {
            PriceCommands::Create {
                unit_amount,
                currency,
                product,
                nickname,
            } => {
                let price = client
                    .create_price(&CreatePriceRequest {
                        unit_amount,
                        currency,
                        product,
                        recurring: None,
                        nickname,
                        tax_behavior: None,
                        metadata: None,
                    })
                    .await?;
                print_json(&price)?;
            }
            PriceCommands::Get { id } => {
                print_json(&client.retrieve_price(&id).await?)?;
            }
            PriceCommands::List { product } => {
                print_json(&client.list_prices(product.as_deref()).await?)?;
            }
            PriceCommands::Delete { id } => {
                print_json(&client.delete_price(&id).await?)?;
            }
        },

        Commands::Subscription { action } => match action {
            SubscriptionCommands::Create {
                customer,
                price,
                trial_days,
            } => {
                let subscription = client
                    .create_subscription(&CreateSubscriptionRequest {
                        customer,
                        price,
                        trial_period_days: trial_days,
                        metadata: None,
                    })
                    .await?;
                print_json(&subscription)?;
            }
            SubscriptionCommands::Get { id } => {
                print_json(&client.retrieve_subscription(&id).await?)?;
            }
            SubscriptionCommands::List { customer } => {
                print_json(&client.list_subscriptions(customer.as_deref()).await?)?;
            }
            SubscriptionCommands::Cancel { id } => {
                print_json(&client.cancel_subscription(&id).await?)?;
            }
        },
    }

    Ok(())
}
