//! Tabular view of a JSON document, or server-side table state sent with
//! the last request.

use clap::Args;

use courier_application::ApplicationError;
use courier_domain::table::{SortDirection, TableMode};
use courier_infrastructure::{Table, TableView};

use super::shared::{InputArgs, OutputArgs, RequestArgs};
use super::{CommandResult, Context, send};
use crate::output::render_table;

#[derive(Debug, Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Column filter as COLUMN=TEXT (case-insensitive substring)
    #[arg(short = 'f', long = "filter", value_name = "COLUMN=TEXT", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Sort column, optionally suffixed with :desc
    #[arg(short = 's', long = "sort", value_name = "COLUMN[:asc|:desc]")]
    pub sort: Option<String>,

    /// client filters here; server prints the request body carrying the query
    #[arg(long = "mode", value_name = "client|server", default_value = "client", value_parser = parse_mode)]
    pub mode: TableMode,

    /// Request body to merge the server query into
    #[arg(long = "body", value_name = "JSON", default_value = "")]
    pub body: String,

    /// Server mode: send the last request (or --from) with the query merged into its body
    #[arg(long = "send")]
    pub send: bool,

    /// Start from a saved request instead of the last one
    #[arg(long = "from", value_name = "COLLECTION/REQUEST", requires = "send")]
    pub from: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Maximum characters per cell
    #[arg(long = "max-width", value_name = "N", default_value_t = 40)]
    pub max_width: usize,
}

impl TableArgs {
    fn view(&self) -> TableView {
        let mut view = TableView::new(self.mode);
        for (column, text) in &self.filters {
            view.set_filter(column.clone(), text.clone());
        }
        if let Some(sort) = &self.sort {
            let (column, direction) = match sort.rsplit_once(':') {
                Some((column, dir)) if dir.eq_ignore_ascii_case("desc") => {
                    (column, SortDirection::Desc)
                }
                Some((column, dir)) if dir.eq_ignore_ascii_case("asc") => {
                    (column, SortDirection::Asc)
                }
                _ => (sort.as_str(), SortDirection::Asc),
            };
            view.set_sort(column, direction);
        }
        view
    }
}

pub async fn execute(ctx: &Context, args: &TableArgs) -> CommandResult {
    let view = args.view();

    if let Some(query) = view.server_query() {
        if !args.send {
            println!("{}", query.merge_into_body(&args.body));
            return Ok(());
        }

        let mut state = ctx.load().await;
        let mut request = RequestArgs {
            from: args.from.clone(),
            ..RequestArgs::default()
        }
        .resolve(&state)?;
        if !args.body.is_empty() {
            request.body.clone_from(&args.body);
        }
        return send::dispatch(
            ctx,
            &mut state,
            &request,
            None,
            Some(&query),
            false,
            args.output.output,
        )
        .await;
    }

    if args.send {
        return Err(ApplicationError::Invalid("--send needs --mode server".to_string()).into());
    }

    let table = Table::from_value(&args.input.read_json()?);
    let rows = view.project(&table);
    print!("{}", render_table(table.columns(), &rows, args.max_width));
    eprintln!("{} of {} rows", rows.len(), table.len());
    Ok(())
}

fn parse_filter(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(column, text)| (column.trim().to_string(), text.to_string()))
        .ok_or_else(|| "filter must be in format COLUMN=TEXT".to_string())
}

fn parse_mode(value: &str) -> Result<TableMode, String> {
    value.parse()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use courier_domain::table::SortSpec;
    use pretty_assertions::assert_eq;

    fn args(sort: Option<&str>, mode: TableMode) -> TableArgs {
        TableArgs {
            input: InputArgs { input: None },
            filters: vec![("team.name".to_string(), "Core".to_string())],
            sort: sort.map(ToString::to_string),
            mode,
            body: String::new(),
            send: false,
            from: None,
            output: OutputArgs {
                output: crate::commands::shared::OutputFormat::Text,
            },
            max_width: 40,
        }
    }

    #[test]
    fn test_sort_suffix() {
        let view = args(Some("created:at:desc"), TableMode::Client).view();
        assert_eq!(view.sort(), Some(&SortSpec::new("created:at", SortDirection::Desc)));

        let view = args(Some("name"), TableMode::Client).view();
        assert_eq!(view.sort(), Some(&SortSpec::new("name", SortDirection::Asc)));
    }

    #[test]
    fn test_server_mode_builds_query() {
        let query = args(Some("id:desc"), TableMode::Server).view().server_query().unwrap();
        assert_eq!(query.filters.get("team.name").map(String::as_str), Some("Core"));
        assert_eq!(query.sort, Some(SortSpec::new("id", SortDirection::Desc)));
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("status=act=ive"),
            Ok(("status".to_string(), "act=ive".to_string()))
        );
        assert!(parse_filter("status").is_err());
    }
}
