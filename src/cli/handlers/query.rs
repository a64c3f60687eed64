//! Generic custom query handler
//!
//! Provides the shared flow of the `races query` and `drivers query` commands:
//! 1. Build the query from CLI args
//! 2. Fetch one page
//! 3. Flatten with the optional column allow-list
//! 4. Print metadata and rows

use std::future::Future;

use colored::Colorize;
use log::debug;
use serde::Serialize;

use crate::cli::{OutputFormat, QueryArgs, Session};
use crate::client::models::PageMetadata;
use crate::client::{Page, QuerySpec, StatsApi};
use crate::error::Result;
use crate::output::{json, table};
use crate::transform::{ColumnSpec, Row, Tabular, flatten};

/// A fetched page after flattening
#[derive(Debug, Serialize)]
pub struct QueryOutput {
    pub metadata: PageMetadata,
    pub records: Vec<Row>,
}

/// Fetch and flatten one page for `args`.
///
/// The column allow-list is validated before the request is sent.
pub async fn fetch_query<T, A, Fut, F>(
    session: &Session<A>,
    args: &QueryArgs,
    resource_name: &str,
    fetcher: F,
) -> Result<QueryOutput>
where
    T: Tabular,
    A: StatsApi,
    Fut: Future<Output = Result<Page<T>>>,
    F: FnOnce(QuerySpec) -> Fut,
{
    let spec = ColumnSpec::or(args.columns.as_deref(), ColumnSpec::all());
    spec.resolve(T::COLUMNS)?;

    let query = args.to_query(session.default_page_size());
    debug!("Querying {} with {}", resource_name, query.to_query_string());

    let page = session
        .fetching(&format!("Fetching {}...", resource_name), fetcher(query))
        .await?;

    debug!("Fetched {} {}", page.records.len(), resource_name);

    Ok(QueryOutput {
        records: flatten(&page.records, &spec)?,
        metadata: page.metadata,
    })
}

/// Run a custom query command end to end.
pub async fn run_query_command<T, A, Fut, F>(
    session: &Session<A>,
    args: &QueryArgs,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    T: Tabular,
    A: StatsApi,
    Fut: Future<Output = Result<Page<T>>>,
    F: FnOnce(QuerySpec) -> Fut,
{
    let output = fetch_query(session, args, resource_name, fetcher).await?;

    match session.format {
        OutputFormat::Json => println!("{}", json::format_json(&output)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            if args.metadata {
                if session.format == OutputFormat::Pretty {
                    println!("{}", "Metadata".bold());
                }
                println!("{}\n", serde_json::to_string_pretty(&output.metadata)?);
            }
            println!("{}", table::format_rows(&output.records));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::SortDir;
    use crate::client::mock::fixtures::race;
    use crate::client::{MockStatsApi, Race};
    use crate::config::Config;
    use crate::error::{Error, TransformError};

    fn args(columns: Option<&str>) -> QueryArgs {
        QueryArgs {
            page: 2,
            page_size: None,
            sort: Some("year".to_string()),
            order: SortDir::Desc,
            filter: Some("year=2023".to_string()),
            scoped: vec![],
            columns: columns.map(String::from),
            metadata: false,
        }
    }

    fn session() -> Session<MockStatsApi> {
        let mock = MockStatsApi::new().with_races(vec![
            race(1098, 2023, "Bahrain Grand Prix", None),
            race(1099, 2023, "Saudi Arabian Grand Prix", None),
        ]);
        Session::with_client(Config::default(), mock, OutputFormat::Json, true)
    }

    #[tokio::test]
    async fn test_fetch_query_uses_args_and_config_page_size() {
        let session = &session();
        let args = args(Some("raceId,name"));
        let output = fetch_query::<Race, _, _, _>(session, &args, "races", |q| async move {
            session.client.list_races(&q).await
        })
        .await
        .unwrap();

        assert_eq!(output.records.len(), 2);
        assert_eq!(
            output.records[0].columns().collect::<Vec<_>>(),
            vec!["raceId", "name"]
        );
        assert_eq!(output.metadata.total_count, Some(2));

        let queries = session.client.inner().captured_queries().await;
        assert_eq!(
            queries[0].query_string,
            "page=2&pageSize=10&filter=year=2023&sort=year&order=desc"
        );
    }

    #[tokio::test]
    async fn test_unknown_column_fails_before_request() {
        let session = &session();
        let args = args(Some("raceId,winner"));
        let err = fetch_query::<Race, _, _, _>(session, &args, "races", |q| async move {
            session.client.list_races(&q).await
        })
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Transform(TransformError::UnknownColumn { ref column, .. }) if column == "winner"
        ));
        assert_eq!(session.client.inner().call_counts().await.total(), 0);
    }
}
