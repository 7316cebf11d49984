//! Command-line arguments.

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use testhub_grid::DEFAULT_PAGE_SIZE;
use testhub_mock::{PostStatus, SortBy, SortOrder};

#[derive(Parser)]
#[command(
    name = "testhub",
    version,
    about = "Terminal test hub for the data grid and the mock services"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Delay before every simulated response, in milliseconds.
    #[arg(
        long = "latency-ms",
        env = "TESTHUB_LATENCY_MS",
        default_value_t = 500,
        global = true
    )]
    pub latency_ms: u64,

    /// Chance in [0, 1] that a simulated request fails.
    #[arg(
        long = "error-rate",
        env = "TESTHUB_ERROR_RATE",
        default_value_t = 0.0,
        value_parser = parse_probability,
        global = true
    )]
    pub error_rate: f64,

    /// Seed for the simulators, for repeatable runs.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log to stderr too (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalArgs {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List users in the grid.
    Users(ListArgs),

    /// List posts in the grid.
    Posts(PostArgs),

    /// Load posts the way an endless feed does, one slice per request.
    Feed(FeedArgs),

    /// Toggle the like on a post.
    Like(LikeArgs),

    /// Show aggregate post statistics.
    Stats,

    /// Validate a sign-up form and create the user.
    CreateUser(CreateUserArgs),

    /// Fire simulated network requests and show the request log.
    Network(NetworkArgs),

    /// Fire requests at the simulated server and show its log.
    Server(ServerArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Page to show.
    #[arg(long, default_value_t = 1, value_parser = parse_positive)]
    pub page: usize,

    /// Rows per page.
    #[arg(
        long = "page-size",
        env = "TESTHUB_PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = parse_positive
    )]
    pub page_size: usize,

    /// Select rows by id. Repeat or separate with commas.
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Toggle the select-all checkbox.
    #[arg(long = "select-all")]
    pub select_all: bool,

    /// With --automatic, select-all covers every page.
    #[arg(long = "all-pages", requires = "automatic")]
    pub all_pages: bool,

    /// Show the row-number column.
    #[arg(long)]
    pub index: bool,

    /// Fetch everything and let the grid paginate.
    #[arg(long)]
    pub automatic: bool,

    /// Render the grid in its loading state and stop.
    #[arg(long)]
    pub loading: bool,

    /// Open the row at this position on the page (1-based) and print it.
    #[arg(long, value_parser = parse_positive)]
    pub open: Option<usize>,
}

#[derive(Args)]
pub struct PostArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Status tab.
    #[arg(long, value_enum, default_value_t = StatusTab::All)]
    pub tab: StatusTab,

    #[arg(long)]
    pub category: Option<String>,

    /// Author display name.
    #[arg(long)]
    pub author: Option<String>,

    /// Required tag. Repeatable.
    #[arg(long)]
    pub tag: Vec<String>,

    /// Case-insensitive text search.
    #[arg(long)]
    pub search: Option<String>,

    /// Only featured posts.
    #[arg(long)]
    pub featured: bool,

    #[arg(long, value_enum, default_value_t = SortArg::CreatedAt)]
    pub sort: SortArg,

    /// Sort ascending instead of descending.
    #[arg(long)]
    pub asc: bool,
}

impl PostArgs {
    pub fn sort(&self) -> (SortBy, SortOrder) {
        let order = if self.asc {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        };
        (self.sort.into(), order)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusTab {
    All,
    Published,
    Draft,
    Archived,
}

impl StatusTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Archived => "archived",
        }
    }

    pub fn status(self) -> Option<PostStatus> {
        match self {
            Self::All => None,
            Self::Published => Some(PostStatus::Published),
            Self::Draft => Some(PostStatus::Draft),
            Self::Archived => Some(PostStatus::Archived),
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::value_variants().iter().map(|tab| tab.label()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    CreatedAt,
    UpdatedAt,
    PublishedAt,
    Views,
    Likes,
    Title,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::CreatedAt => SortBy::CreatedAt,
            SortArg::UpdatedAt => SortBy::UpdatedAt,
            SortArg::PublishedAt => SortBy::PublishedAt,
            SortArg::Views => SortBy::Views,
            SortArg::Likes => SortBy::Likes,
            SortArg::Title => SortBy::Title,
        }
    }
}

#[derive(Args)]
pub struct FeedArgs {
    /// Posts per request.
    #[arg(long, default_value_t = 10, value_parser = parse_positive)]
    pub limit: usize,

    /// How many slices to load in a row.
    #[arg(long, default_value_t = 1, value_parser = parse_positive)]
    pub loads: usize,

    /// Resume from a cursor printed by an earlier run.
    #[arg(long)]
    pub cursor: Option<String>,
}

#[derive(Args)]
pub struct LikeArgs {
    /// Post id, e.g. `post-3`.
    pub id: String,

    /// Toggle this many times in a row.
    #[arg(long, default_value_t = 1, value_parser = parse_positive)]
    pub times: usize,
}

#[derive(Args)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    /// Defaults to --password.
    #[arg(long = "confirm-password")]
    pub confirm_password: Option<String>,

    /// `user` or `admin`.
    #[arg(long, default_value = "user")]
    pub role: String,
}

#[derive(Args)]
pub struct NetworkArgs {
    /// Number of requests, spread over the batch endpoints.
    #[arg(long, default_value_t = 8, value_parser = parse_positive)]
    pub count: usize,

    /// Fail requests whose latency reaches this, in milliseconds. 0 disables.
    #[arg(long = "timeout-ms", default_value_t = 0)]
    pub timeout_ms: u64,
}

#[derive(Args)]
pub struct ServerArgs {
    /// Number of requests.
    #[arg(long, default_value_t = 10, value_parser = parse_positive)]
    pub count: usize,

    /// Endpoint named in the log.
    #[arg(long, default_value = "/api/test")]
    pub endpoint: String,

    /// Disable the random extra delay.
    #[arg(long = "no-jitter")]
    pub no_jitter: bool,
}

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is not in [0, 1]", value))
    }
}
