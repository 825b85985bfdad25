use std::process::ExitCode;

use anyhow::Result;
use blog_cms_core::{
    format_datetime, ApiError, CmsConfig, ContentRepository, ListPostsQuery, Post,
};
use clap::{Parser, Subcommand};
use log::info;

/// Read blog posts and categories from the CMS.
///
/// Credentials come from MICROCMS_SERVICE_DOMAIN and MICROCMS_API_KEY
/// (a `.env` file is honored); MICROCMS_BASE_URL overrides the endpoint.
#[derive(Parser)]
#[command(name = "blog-cms", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of posts
    Posts {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        /// Only posts in this category id
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a single post
    Post { id: String },
    /// List categories
    Categories,
    /// Print post ids, one per line
    Ids {
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ApiError>() {
            Some(ApiError::NotFound { id }) => {
                eprintln!("not found: {id}");
                ExitCode::from(2)
            }
            _ => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = CmsConfig::from_env()?;
    info!("using CMS endpoint {}", config.endpoint_base());
    let repo = ContentRepository::from_config(&config);

    match cli.command {
        Command::Posts {
            limit,
            offset,
            category,
        } => {
            let query = ListPostsQuery {
                limit,
                offset,
                category_id: category,
            };
            let page = repo.list_posts(&query)?;
            for post in &page.contents {
                println!("{}", post_line(post));
            }
            println!(
                "-- {} of {} (offset {}, limit {})",
                page.contents.len(),
                page.total_count,
                page.offset,
                page.limit
            );
        }
        Command::Post { id } => {
            let post = repo.get_post(&id)?;
            println!("{}", post.title);
            let date = format_datetime(post.published_at.as_ref());
            if !date.is_empty() {
                println!("{date}");
            }
            if let Some(category) = &post.category {
                println!("[{}]", category.name);
            }
            println!();
            println!("{}", post.summary());
            println!();
            let html = post.html();
            if html.is_empty() {
                println!("(no content)");
            } else {
                println!("{html}");
            }
        }
        Command::Categories => {
            let page = repo.list_categories()?;
            for category in &page.contents {
                println!("{}\t{}\t{}", category.id, category.slug, category.name);
            }
        }
        Command::Ids { limit } => {
            for id in repo.post_ids(limit)? {
                println!("{id}");
            }
        }
    }
    Ok(())
}

fn post_line(post: &Post) -> String {
    let date = format_datetime(post.published_at.as_ref());
    let category = post
        .category
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");
    format!("{}\t{}\t{}\t{}", post.id, date, category, post.title)
}
