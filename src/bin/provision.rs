use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::Password;
use folio::{
    auth::services::{provision_administrator, ProvisionOutcome},
    blog::repo::BlogRepo,
    blog::repo_types::NewBlogItem,
    db::PgStore,
    portfolio::repo::PortfolioRepo,
    portfolio::repo_types::NewPortfolioItem,
    telemetry,
};

#[derive(Parser)]
#[command(name = "folio-provision")]
#[command(about = "Deployment-time provisioning for the folio backend", long_about = None)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the administrator account (no-op if it already exists)
    Admin {
        #[arg(short = 'e', long, env = "ADMIN_EMAIL")]
        email: String,

        /// Prompted for when omitted
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Replace the password of an existing administrator
        #[arg(long)]
        reset_password: bool,
    },
    /// Add a portfolio item
    Portfolio {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        project_url: Option<String>,
        #[arg(long)]
        repo_url: Option<String>,
        #[arg(long)]
        img_url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Add a blog item
    Blog {
        #[arg(long)]
        title: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        flavor_img_url: Option<String>,
        #[arg(long)]
        ref_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let cli = Cli::parse();
    let store = PgStore::connect(&cli.database_url).await?;
    store.migrate().await?;

    match cli.command {
        Commands::Admin {
            email,
            password,
            reset_password,
        } => {
            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt("Administrator password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .context("read password")?,
            };
            match provision_administrator(&store, &email, &password, reset_password).await? {
                ProvisionOutcome::Created => println!("Administrator {email} created"),
                ProvisionOutcome::AlreadyPresent => {
                    println!("Administrator {email} already exists; nothing changed")
                }
                ProvisionOutcome::PasswordReset => {
                    println!("Administrator {email} password reset")
                }
            }
        }
        Commands::Portfolio {
            title,
            category,
            project_url,
            repo_url,
            img_url,
            description,
            date,
        } => {
            let item = PortfolioRepo::create(
                &store,
                NewPortfolioItem {
                    title,
                    category,
                    project_url,
                    repo_url,
                    img_url,
                    description,
                    date,
                },
            )
            .await?;
            println!("Portfolio item {} created with id {}", item.title, item.id);
        }
        Commands::Blog {
            title,
            date,
            content,
            flavor_img_url,
            ref_url,
        } => {
            let post = BlogRepo::create(
                &store,
                NewBlogItem {
                    title,
                    date,
                    content,
                    flavor_img_url,
                    ref_url,
                },
            )
            .await?;
            println!("Blog item {} created with id {}", post.title, post.id);
        }
    }

    Ok(())
}
