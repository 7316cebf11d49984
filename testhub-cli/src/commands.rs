//! Subcommand handlers.
//!
//! Listings follow the fetch cycle a front end runs: show the loading
//! state, fetch through the CRUD service, hand the page to the grid, then
//! apply the requested selection and draw.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use futures::future::join_all;
use log::{debug, info, warn};
use serde::Serialize;
use testhub_cli::render::{
    metrics_table, render_grid, request_table, server_table, stats_table,
};
use testhub_grid::{
    Alignment, CellValue, Column, DEFAULT_PAGE_SIZE, DataTable, LoadingCounter, Row,
    SelectAllScope, TableProps,
};
use testhub_mock::network::BATCH_ENDPOINTS;
use testhub_mock::{
    CrudService, MockStore, NetworkSimulator, Post, PostFilters, PostQuery, PostService, PostStore,
    RequestLog, ServerConfig, ServerSimulator, ServiceConfig, SimulatorConfig, StatusClass,
    User, UserForm, UserService, UserStore, password_strength, validate_create_user,
};

use crate::cli::{
    CreateUserArgs, FeedArgs, GlobalArgs, LikeArgs, ListArgs, NetworkArgs, PostArgs, ServerArgs,
    StatusTab,
};

/// Service wiring shared by every subcommand.
fn service_config(global: &GlobalArgs) -> ServiceConfig {
    let config = ServiceConfig::new().with_latency(global.latency());
    if global.error_rate > 0.0 {
        let mut simulator = SimulatorConfig::default().error_probability(global.error_rate);
        if let Some(seed) = global.seed {
            simulator = simulator.seed(seed);
        }
        config.with_simulator(Arc::new(NetworkSimulator::new(simulator)))
    } else {
        config
    }
}

fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::new("id", "ID").width(6),
        Column::new("name", "Name"),
        Column::new("email", "Email"),
        Column::new("role", "Role").render(|value, _| value.to_string().to_uppercase()),
        Column::new("createdAt", "Created"),
    ]
}

fn post_columns() -> Vec<Column<Post>> {
    vec![
        Column::new("id", "ID").width(9),
        Column::new("title", "Title").width(40),
        Column::new("author", "Author"),
        Column::new("category", "Category"),
        Column::new("status", "Status"),
        Column::new("featured", "★")
            .render(|value, _| {
                if matches!(value, CellValue::Bool(true)) {
                    "★".to_string()
                } else {
                    String::new()
                }
            }),
        Column::new("views", "Views").align(Alignment::Right),
        Column::new("readTime", "Read").render(|value, _| format!("{} min", value)),
    ]
}

/// Fetch one listing through `service` and print it as a grid.
async fn show_listing<S, F>(
    service: &CrudService<S>,
    props: TableProps<S::Item>,
    args: &ListArgs,
    select: F,
) -> Result<()>
where
    S: MockStore,
    S::Item: Row + Serialize + 'static,
    F: FnOnce(Vec<S::Item>) -> Vec<S::Item> + Send,
{
    let scope = if args.all_pages {
        SelectAllScope::AllPages
    } else {
        SelectAllScope::VisiblePage
    };
    let props = props
        .docs_per_page(args.page_size)
        .manual_pagination(!args.automatic)
        .enable_row_selection(true)
        .enable_index_column(args.index)
        .select_all_scope(scope)
        .is_loading(true)
        .on_page_change(|page| debug!("grid moved to page {}", page))
        .on_row_selection(|selection| debug!("{} rows selected", selection.len()))
        .on_row_double_click(|row| match serde_json::to_string_pretty(row) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("cannot print row: {}", e),
        });
    let mut table = DataTable::new(props)?;

    let mut loading = LoadingCounter::new();
    loading.show(format!("Loading {}...", service.endpoint().to_lowercase()));
    if args.loading {
        println!("{}", render_grid(&table.render(), loading.content()));
        return Ok(());
    }

    if args.automatic {
        let response = service.get_all_with(1, usize::MAX, select).await?;
        table.set_data(response.data);
        table.go_to_page(args.page);
    } else {
        let response = service.get_all_with(args.page, args.page_size, select).await?;
        let total = response
            .metadata
            .map(|m| m.total)
            .unwrap_or(response.data.len());
        table.set_page_data(response.data, args.page, total);
    }
    loading.hide();
    table.set_loading(loading.is_showing());

    for key in &args.select {
        if table.data().iter().any(|row| row.key().as_deref() == Some(key.as_str())) {
            table.toggle_row(key);
        } else {
            warn!("no row with id {} in the fetched data", key);
        }
    }
    if args.select_all {
        table.toggle_all();
    }

    println!("{}", render_grid(&table.render(), loading.content()));

    let selected: Vec<String> = table
        .selected_rows()
        .iter()
        .filter_map(|row| row.key())
        .collect();
    if !selected.is_empty() {
        println!("Selected ({}): {}", selected.len(), selected.join(", "));
    }

    if let Some(position) = args.open
        && !table.double_click_row(position - 1)
    {
        bail!("no row {} on this page", position);
    }
    Ok(())
}

/// `users`
pub async fn run_users(global: &GlobalArgs, args: &ListArgs) -> Result<()> {
    let service: UserService =
        CrudService::new("Users", UserStore::seeded(), service_config(global));
    let props = TableProps::new(Vec::new(), user_columns());
    show_listing(&service, props, args, |users| users).await
}

/// `posts`
pub async fn run_posts(global: &GlobalArgs, args: &PostArgs) -> Result<()> {
    let service = post_service(global);

    let mut filters = PostFilters::new();
    if let Some(status) = args.tab.status() {
        filters = filters.status(status);
    }
    if let Some(category) = &args.category {
        filters = filters.category(category.as_str());
    }
    if let Some(author) = &args.author {
        filters = filters.author(author.as_str());
    }
    for tag in &args.tag {
        filters = filters.tag(tag.as_str());
    }
    if let Some(term) = &args.search {
        filters = filters.search(term.as_str());
    }
    if args.featured {
        filters = filters.featured(true);
    }
    let (sort_by, order) = args.sort();
    let query = PostQuery::new().filters(filters).sort(sort_by, order);

    let props = TableProps::new(Vec::new(), post_columns())
        .tabs(StatusTab::labels())
        .active_tab(args.tab.label())
        .on_tab_change(|tab| debug!("tab changed to {}", tab));
    show_listing(&service, props, &args.list, move |posts| query.apply(posts)).await
}

fn post_service(global: &GlobalArgs) -> PostService {
    CrudService::new("Posts", PostStore::seeded(), service_config(global))
}

/// `feed`
pub async fn run_feed(global: &GlobalArgs, args: &FeedArgs) -> Result<()> {
    let service = post_service(global);
    let mut loading = LoadingCounter::new();
    let mut posts = Vec::new();
    let mut cursor = args.cursor.clone();

    for load in 1..=args.loads {
        loading.show("Loading more posts...");
        let response = service.get_infinite(cursor.as_deref(), args.limit).await;
        loading.hide();
        let page = response?.into_data();
        debug!("feed load {}: {} posts", load, page.items().len());
        cursor = page.next_cursor().map(str::to_string);
        posts.extend(page.into_items());
        if cursor.is_none() {
            break;
        }
    }

    let page_size = posts.len().max(1);
    let props = TableProps::new(posts, post_columns())
        .docs_per_page(page_size)
        .manual_pagination(false)
        .enable_index_column(true);
    let table = DataTable::new(props)?;
    println!("{}", render_grid(&table.render(), loading.content()));

    match cursor {
        Some(next) => println!("More posts: --cursor {}", next),
        None => println!("End of feed"),
    }
    Ok(())
}

/// `like`
pub async fn run_like(global: &GlobalArgs, args: &LikeArgs) -> Result<()> {
    let service = post_service(global);
    for _ in 0..args.times {
        let response = service.toggle_like(&args.id).await?;
        println!(
            "{}: {} ({} likes)",
            args.id,
            response.message.as_deref().unwrap_or_default(),
            response.data.likes_count
        );
    }
    Ok(())
}

/// `stats`
pub async fn run_stats(global: &GlobalArgs) -> Result<()> {
    let response = post_service(global).stats().await?;
    if let Some(message) = &response.message {
        info!("{}", message);
    }
    println!("{}", stats_table(&response.data));
    Ok(())
}

/// `create-user`
pub async fn run_create_user(global: &GlobalArgs, args: &CreateUserArgs) -> Result<()> {
    let form = UserForm {
        name: args.name.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        confirm_password: args
            .confirm_password
            .clone()
            .unwrap_or_else(|| args.password.clone()),
        role: args.role.clone(),
    };

    let strength = password_strength(&form.password);
    println!("Password strength: {} ({}/5)", strength, strength.score());

    let result = validate_create_user(&form);
    if !result.is_valid() {
        for error in result.errors() {
            eprintln!("  {}: {}", error.field, error.message);
        }
        bail!("{} field(s) failed validation", result.errors().len());
    }

    let service: UserService =
        CrudService::new("Users", UserStore::seeded(), service_config(global));
    let created = service.create(form.into_input()?).await?;
    if let Some(message) = &created.message {
        println!("{}", message);
    }
    info!("created user {}", created.data.id);

    let listing = ListArgs {
        page: 1,
        page_size: DEFAULT_PAGE_SIZE,
        select: vec![created.data.id],
        select_all: false,
        all_pages: false,
        index: true,
        automatic: true,
        loading: false,
        open: None,
    };
    let props = TableProps::new(Vec::new(), user_columns());
    show_listing(&service, props, &listing, |users| users).await
}

/// `network`
pub async fn run_network(global: &GlobalArgs, args: &NetworkArgs) -> Result<()> {
    let mut config = SimulatorConfig::default()
        .latency(global.latency())
        .timeout(Duration::from_millis(args.timeout_ms))
        .error_probability(global.error_rate);
    if let Some(seed) = global.seed {
        config = config.seed(seed);
    }
    let simulator = NetworkSimulator::new(config);

    let endpoints: Vec<&str> = BATCH_ENDPOINTS
        .iter()
        .copied()
        .cycle()
        .take(args.count)
        .collect();
    let mut log = RequestLog::new();
    simulator.run_batch(&endpoints, &mut log).await;

    println!("{}", request_table(&log));
    let stats = log.stats();
    println!(
        "Total: {}    Succeeded: {}    Failed: {}    Average: {} ms",
        stats.total,
        stats.success,
        stats.failed,
        stats.average_duration.as_millis()
    );
    Ok(())
}

/// `server`
pub async fn run_server(global: &GlobalArgs, args: &ServerArgs) -> Result<()> {
    let mut config = ServerConfig::default()
        .error_rate(global.error_rate)
        .latency(global.latency())
        .jitter(!args.no_jitter);
    if let Some(seed) = global.seed {
        config = config.seed(seed);
    }
    let server = ServerSimulator::new(config);

    join_all((0..args.count).map(|_| server.make_request(&args.endpoint))).await;
    let metrics = server.tick();

    let logs = server.logs();
    println!("{}", server_table(&logs));
    let count = |class| logs.iter().filter(|e| e.status.class == class).count();
    println!(
        "Success: {}    Client errors: {}    Server errors: {}",
        count(StatusClass::Success),
        count(StatusClass::Client),
        count(StatusClass::Server)
    );
    println!("{}", metrics_table(&metrics));
    Ok(())
}
