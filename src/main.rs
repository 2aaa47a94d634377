// src/main.rs
use anyhow::Context;
use clap::Parser;
use futures::stream::{BoxStream, StreamExt};
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config,
};
use notions::api::{Direction, SearchFilter, SearchObjectKind, Sort};
use notions::config::{ApiArgs, Command, CommandLineInput, DatabaseCommand, PageCommand, SearchArgs};
use notions::{
    flatten_database, flatten_page, AppError, DatabaseId, NotionHttpClient, PageId,
    QueryDatabaseRequest, SearchRequest,
};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Sets up logging on stderr so stdout stays pure JSON lines.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .build(Root::builder().appender("stderr").build(log_level))?;

    log4rs::init_config(config)?;
    Ok(())
}

fn print_line<T: Serialize>(item: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(item)?);
    Ok(())
}

/// Prints every item of a stream, one JSON document per line.
async fn print_stream<T, F>(
    mut items: BoxStream<'static, Result<T, AppError>>,
    render: F,
) -> anyhow::Result<usize>
where
    F: Fn(T) -> Result<Value, AppError>,
{
    let mut count = 0;
    while let Some(item) = items.next().await {
        print_line(&render(item?)?)?;
        count += 1;
    }
    Ok(count)
}

async fn run_database(
    client: &NotionHttpClient,
    command: DatabaseCommand,
    flat: bool,
) -> anyhow::Result<()> {
    match command {
        DatabaseCommand::List => {
            let count = print_stream(client.list_databases(), |database| {
                if flat {
                    flatten_database(&database).into_value()
                } else {
                    serde_json::to_value(database).map_err(AppError::Encode)
                }
            })
            .await?;
            log::info!("Listed {} databases", count);
        }
        DatabaseCommand::Query {
            database,
            sort_properties,
        } => {
            let id = DatabaseId::parse(&database)?;
            let mut request = QueryDatabaseRequest::default();
            for spec in &sort_properties {
                request = request.with_sort(
                    Sort::parse_property(spec)
                        .with_context(|| format!("invalid --sort-property `{}`", spec))?,
                );
            }
            let count = print_stream(client.query_database(&id, &request), |page| {
                if flat {
                    flatten_page(&page).into_value()
                } else {
                    serde_json::to_value(page).map_err(AppError::Encode)
                }
            })
            .await?;
            log::info!("Queried {} rows from {}", count, id);
        }
    }
    Ok(())
}

async fn run_page(client: &NotionHttpClient, command: PageCommand, flat: bool) -> anyhow::Result<()> {
    match command {
        PageCommand::Get { page } => {
            let page = client.get_page(&PageId::parse(&page)?).await?;
            if flat {
                print_line(&flatten_page(&page))
            } else {
                print_line(&page)
            }
        }
    }
}

async fn run_search(client: &NotionHttpClient, args: SearchArgs, flat: bool) -> anyhow::Result<()> {
    let mut request = SearchRequest {
        query: args.query,
        ..SearchRequest::default()
    };
    if let Some(filter) = args.filter {
        let kind: SearchObjectKind = filter
            .parse()
            .with_context(|| format!("invalid --filter `{}`", filter))?;
        request = request.with_filter(SearchFilter::only(kind));
    }
    request.sort.direction = Direction::Descending;

    print_stream(client.search(&request), |hit| {
        if flat {
            hit.flatten()
        } else {
            serde_json::to_value(hit).map_err(AppError::Encode)
        }
    })
    .await?;
    Ok(())
}

async fn run_api(client: &NotionHttpClient, args: ApiArgs) -> anyhow::Result<()> {
    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method `{}`", args.method))?;
    let body: Option<Value> = args
        .data
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("--data is not valid JSON")?;

    if args.paginate {
        let pagination_in_json = method != Method::GET;
        let mut pages = client.paginated_request(method, &args.path, pagination_in_json, body);
        while let Some(envelope) = pages.next().await {
            for item in envelope?.results {
                print_line(&item)?;
            }
        }
    } else {
        let response = client.request(method, &args.path, body.as_ref()).await?;
        log::debug!("{} from {}", response.status, response.url);
        print_line(&response.data)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = cli.client_config()?;
    let client = NotionHttpClient::new(&config)?;

    match cli.command {
        Command::Database(command) => run_database(&client, command, cli.flat).await,
        Command::Page(command) => run_page(&client, command, cli.flat).await,
        Command::Search(args) => run_search(&client, args, cli.flat).await,
        Command::Api(args) => run_api(&client, args).await,
    }
}
