//! Pubhub CLI - Command-line interface for the Pubhub API

mod output;
mod telemetry;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use futures::TryStreamExt;
use output::{
    print_table, AccountRow, LinkRow, PageRow, PostRow, QrRow, SubmissionRow, TaskRow,
    VariableRow, WorkspaceRow,
};
use pubhub_sdk::{
    load_media, CreateHtmlPage, CreateQrCode, CreateShortLink, CreateWorkspace, CursorRequest,
    PageRequest, Platform, PostFilter, PublishOptions, PublishTarget, PubhubClient, QrFormat,
    Settings, TaskFilter, VideoSource, DEFAULT_PAGE_SIZE,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pubhub")]
#[command(about = "Pubhub content-publishing CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API key (overrides the config file)
    #[arg(long, env = "PUBHUB_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API base URL (overrides the config file)
    #[arg(long, env = "PUBHUB_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Config file (default: $XDG_CONFIG_HOME/pubhub/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log request and response bodies
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// QR codes
    #[command(subcommand)]
    Qr(QrCommand),

    /// Short links
    #[command(subcommand)]
    Link(LinkCommand),

    /// Hosted HTML pages
    #[command(subcommand)]
    Page(PageCommand),

    /// Form submissions of hosted pages
    #[command(subcommand)]
    Submission(SubmissionCommand),

    /// Page variables
    #[command(subcommand)]
    Var(VarCommand),

    /// Social publisher workspaces
    #[command(subcommand)]
    Workspace(WorkspaceCommand),

    /// Publishing tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Published posts
    #[command(subcommand)]
    Post(PostCommand),
}

#[derive(Args)]
struct PageArgs {
    /// Zero-based page number
    #[arg(long, default_value = "0")]
    page: u32,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        PageRequest::new(args.page, args.page_size)
    }
}

#[derive(Args)]
struct CursorArgs {
    /// Cursor from a previous page
    #[arg(long)]
    cursor: Option<String>,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
}

impl From<CursorArgs> for CursorRequest {
    fn from(args: CursorArgs) -> Self {
        CursorRequest {
            cursor: args.cursor,
            page_size: args.page_size,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ImageFormat {
    Png,
    Svg,
    Jpg,
}

impl From<ImageFormat> for QrFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => QrFormat::Png,
            ImageFormat::Svg => QrFormat::Svg,
            ImageFormat::Jpg => QrFormat::Jpg,
        }
    }
}

#[derive(Subcommand)]
enum QrCommand {
    /// Create a QR code
    Create {
        #[arg(long)]
        name: String,

        /// Encoded content (URL or text)
        #[arg(long)]
        content: String,

        /// Foreground and background colors (#RRGGBB)
        #[arg(long, num_args = 2, value_names = ["FG", "BG"])]
        colors: Option<Vec<String>>,

        /// Size in pixels
        #[arg(long)]
        size: Option<u32>,

        #[arg(long, value_enum)]
        format: Option<ImageFormat>,
    },
    Get {
        id: String,
    },
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum LinkCommand {
    /// Shorten a URL
    Create {
        url: String,

        #[arg(long)]
        slug: Option<String>,

        #[arg(long)]
        title: Option<String>,
    },
    Get {
        id: String,
    },
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Delete {
        id: String,
    },
    /// Click statistics
    Stats {
        id: String,
    },
}

#[derive(Subcommand)]
enum PageCommand {
    /// Upload a local file as a hosted page
    Upload {
        path: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        slug: Option<String>,
    },
    Get {
        id: String,
    },
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum SubmissionCommand {
    /// Submissions received by a hosted page
    List {
        page_id: String,

        #[command(flatten)]
        cursor: CursorArgs,
    },
    Get {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum VarCommand {
    /// Create or update a variable
    Set {
        key: String,
        value: String,
    },
    Get {
        key: String,
    },
    List {
        #[command(flatten)]
        cursor: CursorArgs,
    },
    Delete {
        key: String,
    },
}

#[derive(Subcommand)]
enum WorkspaceCommand {
    Create {
        name: String,

        #[arg(long)]
        description: Option<String>,
    },
    /// List every workspace
    List,
    /// Connected accounts of a workspace
    Accounts {
        id: String,
    },
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Publish a video (local file, URL or repost link)
    Publish {
        /// Local path, video URL or Facebook/TikTok/YouTube Shorts link
        source: String,

        /// Publish to every account of this workspace
        #[arg(long, conflicts_with = "account", required_unless_present = "account")]
        workspace: Option<String>,

        /// Publish to a single account
        #[arg(long)]
        account: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        caption: Option<String>,

        /// Restrict to platforms (repeatable)
        #[arg(long = "platform")]
        platforms: Vec<Platform>,

        /// RFC 3339 timestamp
        #[arg(long)]
        schedule: Option<DateTime<Utc>>,

        /// Local thumbnail image
        #[arg(long)]
        thumbnail: Option<String>,
    },
    Get {
        id: String,
    },
    List {
        #[arg(long)]
        workspace: Option<String>,

        #[arg(long)]
        account: Option<String>,

        #[command(flatten)]
        cursor: CursorArgs,
    },
    Cancel {
        id: String,
    },
}

#[derive(Subcommand)]
enum PostCommand {
    List {
        #[arg(long)]
        account: Option<String>,

        #[arg(long)]
        task: Option<String>,

        #[arg(long)]
        platform: Option<Platform>,

        #[command(flatten)]
        page: PageArgs,
    },
    Get {
        id: String,
    },
    Delete {
        id: String,
    },
}

// RUST_LOG wins over this when set
fn default_filter(debug: bool) -> &'static str {
    if debug {
        "pubhub=debug"
    } else {
        "pubhub=warn"
    }
}

fn init_logging(debug: bool) -> Result<()> {
    let log_format = std::env::var("PUBHUB_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(debug)))
        .context("Failed to create env filter")?;

    // Logs go to stderr so tables on stdout stay clean
    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(telemetry::layer()?)
            .init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .with(telemetry::layer()?)
            .init(),
    }
    Ok(())
}

fn build_client(cli: &Cli) -> Result<PubhubClient> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(Some(expand(path).as_path())),
        None => Settings::load(),
    }
    .context("Failed to load settings")?;

    if let Some(key) = &cli.api_key {
        settings.api_key = Some(key.clone());
    }
    if let Some(url) = &cli.base_url {
        settings.base_url = url.clone();
    }
    settings.debug |= cli.debug;

    let config = settings
        .client_config()
        .context("Invalid client configuration")?;
    PubhubClient::with_config(config).context("Failed to create client")
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

fn is_link(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

async fn video_source(source: &str) -> Result<VideoSource> {
    if is_link(source) {
        return VideoSource::detect(source).context("Unsupported video source");
    }
    let path = expand(source);
    let media = load_media(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(VideoSource::File(media))
}

fn done(message: impl AsRef<str>) {
    println!("{}", format!("✓ {}", message.as_ref()).green().bold());
}

async fn run_qr(client: &PubhubClient, command: QrCommand) -> Result<()> {
    let qr_codes = client.qr_codes();
    match command {
        QrCommand::Create {
            name,
            content,
            colors,
            size,
            format,
        } => {
            let mut request = CreateQrCode::new(name, content);
            if let Some([fg, bg]) = colors.as_deref() {
                request = request.colors(fg.clone(), bg.clone());
            }
            if let Some(size) = size {
                request = request.size(size);
            }
            if let Some(format) = format {
                request = request.format(format.into());
            }
            let qr = qr_codes.create(request).await?;
            done(format!("QR code {} created", qr.id));
            print_table(vec![QrRow::from(qr)]);
        }
        QrCommand::Get { id } => print_table(vec![QrRow::from(qr_codes.get(&id).await?)]),
        QrCommand::List { page } => {
            let page = qr_codes.list(page.into()).await?;
            let has_more = page.has_more();
            print_table(page.items.into_iter().map(QrRow::from).collect());
            more_hint(has_more);
        }
        QrCommand::Delete { id } => {
            qr_codes.delete(&id).await?;
            done(format!("QR code {} deleted", id));
        }
    }
    Ok(())
}

async fn run_link(client: &PubhubClient, command: LinkCommand) -> Result<()> {
    let links = client.short_links();
    match command {
        LinkCommand::Create { url, slug, title } => {
            let mut request = CreateShortLink::new(url);
            if let Some(slug) = slug {
                request = request.slug(slug);
            }
            if let Some(title) = title {
                request = request.title(title);
            }
            let link = links.create(request).await?;
            done(format!("Short link {} created", link.id));
            print_table(vec![LinkRow::from(link)]);
        }
        LinkCommand::Get { id } => print_table(vec![LinkRow::from(links.get(&id).await?)]),
        LinkCommand::List { page } => {
            let page = links.list(page.into()).await?;
            let has_more = page.has_more();
            print_table(page.items.into_iter().map(LinkRow::from).collect());
            more_hint(has_more);
        }
        LinkCommand::Delete { id } => {
            links.delete(&id).await?;
            done(format!("Short link {} deleted", id));
        }
        LinkCommand::Stats { id } => {
            let stats = links.stats(&id).await?;
            println!("  {} {}", "Total clicks:".bold(), stats.total_clicks);
            println!("  {} {}", "Unique clicks:".bold(), stats.unique_clicks);
            if let Some(at) = stats.last_clicked_at {
                println!("  {} {}", "Last click:".bold(), at);
            }
        }
    }
    Ok(())
}

async fn run_page(client: &PubhubClient, command: PageCommand) -> Result<()> {
    let pages = client.html_hosting();
    match command {
        PageCommand::Upload { path, name, slug } => {
            let media = load_media(expand(&path))
                .await
                .with_context(|| format!("Failed to read {}", path))?;
            let mut request = CreateHtmlPage::html(name, media.file_name.clone())
                .content_type(media.content_type.clone());
            if let Some(slug) = slug {
                request = request.slug(slug);
            }
            let page = pages.create(request, media.bytes).await?;
            done(format!("Page {} uploaded", page.id));
            print_table(vec![PageRow::from(page)]);
        }
        PageCommand::Get { id } => print_table(vec![PageRow::from(pages.get(&id).await?)]),
        PageCommand::List { page } => {
            let page = pages.list(page.into()).await?;
            let has_more = page.has_more();
            print_table(page.items.into_iter().map(PageRow::from).collect());
            more_hint(has_more);
        }
        PageCommand::Delete { id } => {
            pages.delete(&id).await?;
            done(format!("Page {} deleted", id));
        }
    }
    Ok(())
}

async fn run_submission(client: &PubhubClient, command: SubmissionCommand) -> Result<()> {
    let submissions = client.submissions();
    match command {
        SubmissionCommand::List { page_id, cursor } => {
            let page = submissions.list(&page_id, cursor.into()).await?;
            print_table(page.items.into_iter().map(SubmissionRow::from).collect());
            cursor_hint(page.next_cursor.as_deref());
        }
        SubmissionCommand::Get { id } => {
            print_table(vec![SubmissionRow::from(submissions.get(&id).await?)])
        }
        SubmissionCommand::Delete { id } => {
            submissions.delete(&id).await?;
            done(format!("Submission {} deleted", id));
        }
    }
    Ok(())
}

async fn run_var(client: &PubhubClient, command: VarCommand) -> Result<()> {
    let variables = client.variables();
    match command {
        VarCommand::Set { key, value } => {
            let variable = variables.set(&key, &value).await?;
            done(format!("Variable {} set", variable.key));
        }
        VarCommand::Get { key } => {
            print_table(vec![VariableRow::from(variables.get(&key).await?)])
        }
        VarCommand::List { cursor } => {
            let page = variables.list(cursor.into()).await?;
            print_table(page.items.into_iter().map(VariableRow::from).collect());
            cursor_hint(page.next_cursor.as_deref());
        }
        VarCommand::Delete { key } => {
            variables.delete(&key).await?;
            done(format!("Variable {} deleted", key));
        }
    }
    Ok(())
}

async fn run_workspace(client: &PubhubClient, command: WorkspaceCommand) -> Result<()> {
    let workspaces = client.workspaces();
    match command {
        WorkspaceCommand::Create { name, description } => {
            let mut request = CreateWorkspace::new(name);
            if let Some(description) = description {
                request = request.description(description);
            }
            let workspace = workspaces.create(request).await?;
            done(format!("Workspace {} created", workspace.id));
        }
        WorkspaceCommand::List => {
            let all: Vec<_> = workspaces.list_all(DEFAULT_PAGE_SIZE).try_collect().await?;
            print_table(all.into_iter().map(WorkspaceRow::from).collect());
        }
        WorkspaceCommand::Accounts { id } => {
            let accounts = workspaces.list_accounts(&id).await?;
            print_table(accounts.into_iter().map(AccountRow::from).collect());
        }
    }
    Ok(())
}

async fn run_task(client: &PubhubClient, command: TaskCommand) -> Result<()> {
    let tasks = client.tasks();
    match command {
        TaskCommand::Publish {
            source,
            workspace,
            account,
            title,
            caption,
            platforms,
            schedule,
            thumbnail,
        } => {
            let target = match (workspace, account) {
                (Some(id), _) => PublishTarget::Workspace(id),
                (None, Some(id)) => PublishTarget::Account(id),
                (None, None) => anyhow::bail!("either --workspace or --account is required"),
            };

            let mut options = PublishOptions {
                title,
                caption,
                scheduled_at: schedule,
                ..Default::default()
            };
            for platform in platforms {
                options = options.platform(platform);
            }
            if let Some(path) = thumbnail {
                let media = load_media(expand(&path))
                    .await
                    .with_context(|| format!("Failed to read {}", path))?;
                options = options.thumbnail(media);
            }

            let source = video_source(&source).await?;
            println!(
                "{}",
                format!("Publishing {} source...", source.source_type()).cyan()
            );
            let task = tasks.publish(target, source, options).await?;
            done(format!("Task {} registered", task.id));
            print_table(vec![TaskRow::from(task)]);
        }
        TaskCommand::Get { id } => {
            let task = tasks.get(&id).await?;
            let posts = task.posts.clone();
            print_table(vec![TaskRow::from(task)]);
            if !posts.is_empty() {
                println!();
                print_table(posts.into_iter().map(PostRow::from).collect());
            }
        }
        TaskCommand::List {
            workspace,
            account,
            cursor,
        } => {
            let filter = TaskFilter {
                workspace_id: workspace,
                account_id: account,
                status: None,
            };
            let page = tasks.list(cursor.into(), &filter).await?;
            print_table(page.items.into_iter().map(TaskRow::from).collect());
            cursor_hint(page.next_cursor.as_deref());
        }
        TaskCommand::Cancel { id } => {
            tasks.cancel(&id).await?;
            done(format!("Task {} cancelled", id));
        }
    }
    Ok(())
}

async fn run_post(client: &PubhubClient, command: PostCommand) -> Result<()> {
    let posts = client.posts();
    match command {
        PostCommand::List {
            account,
            task,
            platform,
            page,
        } => {
            let filter = PostFilter {
                account_id: account,
                task_id: task,
                platform,
                ..Default::default()
            };
            let page = posts.list(page.into(), &filter).await?;
            let has_more = page.has_more();
            print_table(page.items.into_iter().map(PostRow::from).collect());
            more_hint(has_more);
        }
        PostCommand::Get { id } => print_table(vec![PostRow::from(posts.get(&id).await?)]),
        PostCommand::Delete { id } => {
            posts.delete(&id).await?;
            done(format!("Post {} deleted", id));
        }
    }
    Ok(())
}

fn more_hint(has_more: bool) {
    if has_more {
        println!("{}", "More results available (use --page)".yellow());
    }
}

fn cursor_hint(next: Option<&str>) {
    if let Some(cursor) = next {
        println!("{} {}", "Next page:".yellow(), format!("--cursor {}", cursor).bold());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug)?;
    let client = build_client(&cli)?;

    let result = match cli.command {
        Commands::Qr(command) => run_qr(&client, command).await,
        Commands::Link(command) => run_link(&client, command).await,
        Commands::Page(command) => run_page(&client, command).await,
        Commands::Submission(command) => run_submission(&client, command).await,
        Commands::Var(command) => run_var(&client, command).await,
        Commands::Workspace(command) => run_workspace(&client, command).await,
        Commands::Task(command) => run_task(&client, command).await,
        Commands::Post(command) => run_post(&client, command).await,
    };

    telemetry::shutdown();
    result
}
