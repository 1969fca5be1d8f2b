//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{resolve, resolve_endpoint, Connection, ConnectionConfig, Environment};
use crate::engine::{self, Query, QueryEngine};
use crate::error::{Error, Result};
use crate::filter::{parse_predicates, FetchPlan, KeyFilter};
use crate::http::HttpClient;
use crate::output::{pretty_format, write_parquet, BatchSink, JsonLinesSink};
use crate::tables::{self, TableDef};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
    env: Environment,
}

impl Runner {
    /// Create a new runner reading `GITLAB_ADDR` / `GITLAB_TOKEN`
    pub fn new(cli: Cli) -> Self {
        Self::with_environment(cli, Environment::from_process())
    }

    /// Create a runner with an explicit environment
    pub fn with_environment(cli: Cli, env: Environment) -> Self {
        Self { cli, env }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Tables => self.tables(),
            Commands::Schema { table } => self.schema(table),
            Commands::Query {
                table,
                predicates,
                limit,
                format,
                output,
                explain,
            } => {
                let query = Query {
                    table: table.clone(),
                    predicates: parse_predicates(predicates)?,
                    limit: *limit,
                };
                if *explain {
                    self.explain(&query)
                } else {
                    self.query(&query, *format, output.as_deref()).await
                }
            }
            Commands::Check => self.check().await,
            Commands::Serve { port } => {
                let config = crate::cli::ServerConfig {
                    connection: self.connection()?,
                };
                crate::cli::serve(config, *port).await
            }
        }
    }

    /// Resolve the connection: flags, then the connection file, then the environment
    pub fn connection(&self) -> Result<Connection> {
        resolve(&self.connection_config()?, &self.env)
    }

    fn connection_config(&self) -> Result<ConnectionConfig> {
        let file = match &self.cli.config {
            Some(path) => ConnectionConfig::from_file(path)?,
            None => ConnectionConfig::new(),
        };
        Ok(file.merge(self.cli.flag_config()))
    }

    /// Translate a query for the configured instance; no token is needed
    pub fn plan(&self, query: &Query) -> Result<(&'static TableDef, FetchPlan)> {
        let (_, deployment) = resolve_endpoint(&self.connection_config()?, &self.env)?;
        engine::plan(query, deployment)
    }

    /// List tables
    fn tables(&self) -> Result<()> {
        let tables: Vec<Value> = tables::catalog()
            .iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "required_keys": t.required_keys(),
                })
            })
            .collect();

        print_json(&json!({ "tables": tables }))
    }

    /// Describe one table
    fn schema(&self, name: &str) -> Result<()> {
        print_json(&describe_table(tables::table(name)?))
    }

    /// Print the fetch plan of a query
    fn explain(&self, query: &Query) -> Result<()> {
        let (table, plan) = self.plan(query)?;
        print_json(&describe_plan(table, &plan))
    }

    /// Run a query and render its rows
    async fn query(&self, query: &Query, format: OutputFormat, output: Option<&Path>) -> Result<()> {
        let table = tables::table(&query.table)?;
        let connection = self.connection()?;
        let engine = QueryEngine::from_connection(&connection)?;

        let stats = match format {
            OutputFormat::Json => {
                let writer: Box<dyn Write + Send> = match output {
                    Some(path) => Box::new(BufWriter::new(create_file(path)?)),
                    None => Box::new(BufWriter::new(std::io::stdout())),
                };
                let mut sink = JsonLinesSink::new(&table.columns, writer);
                let stats = engine.execute(query, &mut sink).await?;
                sink.finish()?;
                stats
            }
            OutputFormat::Pretty => {
                let mut sink = BatchSink::new(&table.columns);
                let stats = engine.execute(query, &mut sink).await?;
                let rendered = pretty_format(&table.columns, &sink.finish()?)?;
                match output {
                    Some(path) => {
                        let mut file = create_file(path)?;
                        writeln!(file, "{rendered}")?;
                    }
                    None => println!("{rendered}"),
                }
                stats
            }
            OutputFormat::Parquet => {
                let path = output
                    .ok_or_else(|| Error::config("Parquet format requires --output <file>"))?;
                let mut sink = BatchSink::new(&table.columns);
                let stats = engine.execute(query, &mut sink).await?;
                write_parquet(path, &table.columns, &sink.finish()?, None)?;
                stats
            }
        };

        if stats.cancelled {
            info!(table = table.name, rows = stats.rows, "Stopped at row limit");
        }
        Ok(())
    }

    /// Test the connection by reading the instance version
    async fn check(&self) -> Result<()> {
        let connection = self.connection()?;
        let client = HttpClient::from_connection(&connection)?;

        info!(base_url = %connection.base_url, "Checking connection");
        let version: Value = client.get_json("/version").await?;

        print_json(&json!({
            "status": "SUCCEEDED",
            "base_url": connection.base_url,
            "deployment": connection.deployment,
            "version": version.get("version"),
            "revision": version.get("revision"),
        }))
    }
}

/// JSON description of a table: columns, filters and routes
pub fn describe_table(table: &TableDef) -> Value {
    let columns: Vec<Value> = table
        .columns
        .iter()
        .map(|c| {
            json!({
                "name": c.name,
                "type": c.column_type,
                "description": c.description,
            })
        })
        .collect();

    let filters: Vec<Value> = table
        .keys
        .iter()
        .map(|k| match k.filter {
            KeyFilter::Param(param) => {
                json!({"column": k.column, "operators": ["="], "param": param})
            }
            KeyFilter::Enum(param) => {
                json!({"column": k.column, "operators": ["="], "param": param, "lowercased": true})
            }
            KeyFilter::Range { after, before, .. } => json!({
                "column": k.column,
                "operators": ["=", ">", ">=", "<", "<="],
                "params": [after, before],
            }),
        })
        .collect();

    let routes: Vec<&str> = table.routes.iter().map(|r| r.template).collect();

    json!({
        "name": table.name,
        "description": table.description,
        "columns": columns,
        "filters": filters,
        "scoping_keys": table.scoping_keys(),
        "required_keys": table.required_keys(),
        "routes": routes,
        "plan": table.plan,
        "page_size": table.page_size,
    })
}

/// JSON description of a fetch plan
pub(crate) fn describe_plan(table: &TableDef, plan: &FetchPlan) -> Value {
    let requests: Vec<Value> = plan
        .requests
        .iter()
        .map(|r| {
            json!({
                "path": r.path,
                "params": r.params,
                "single": r.single,
                "page_size": r.page_size,
            })
        })
        .collect();
    let residual: Vec<String> = plan.residual.iter().map(ToString::to_string).collect();

    json!({
        "table": table.name,
        "requests": requests,
        "residual": residual,
    })
}

fn create_file(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::Output {
        message: format!("Failed to create {}: {e}", path.display()),
    })
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write as _;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn runner(args: &[&str], env: Environment) -> Runner {
        let mut argv = vec!["gitlab-tables"];
        argv.extend_from_slice(args);
        Runner::with_environment(Cli::parse_from(argv), env)
    }

    #[test]
    fn test_flags_override_environment() {
        let env = Environment {
            addr: Some("https://env.example.com/api/v4".to_string()),
            token: Some("env-token".to_string()),
        };
        let r = runner(&["--base-url", "https://flag.example.com/api/v4", "tables"], env);

        let connection = r.connection().unwrap();
        assert_eq!(connection.base_url, "https://flag.example.com/api/v4");
        assert_eq!(connection.token, "env-token");
        assert!(!connection.is_public());
    }

    #[test]
    fn test_connection_file_is_read() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://gitlab.com/api/v4\ntoken: file-token").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let r = runner(&["-C", &path, "check"], Environment::empty());
        let connection = r.connection().unwrap();
        assert_eq!(connection.token, "file-token");
        assert!(connection.is_public());
    }

    #[test]
    fn test_missing_token() {
        let r = runner(&["tables"], Environment::empty());
        let err = r.connection().unwrap_err();
        assert!(matches!(err, Error::MissingCredential { .. }));
    }

    #[test]
    fn test_plan_without_token() {
        let r = runner(&["tables"], Environment::empty());
        let query = Query {
            table: "issue".to_string(),
            predicates: parse_predicates(&["project_id=7".to_string()]).unwrap(),
            limit: None,
        };

        let (table, plan) = r.plan(&query).unwrap();
        assert_eq!(table.name, "gitlab_issue");
        assert_eq!(plan.requests[0].path, "/projects/7/issues");
    }

    #[test]
    fn test_plan_uses_public_rules_without_token() {
        let r = runner(&["tables"], Environment::empty());
        let query = Query {
            table: "gitlab_project".to_string(),
            predicates: Vec::new(),
            limit: None,
        };

        let err = r.plan(&query).unwrap_err();
        assert!(err.is_translation());
    }

    #[test]
    fn test_query_arguments() {
        let cli = Cli::parse_from([
            "gitlab-tables",
            "query",
            "commit",
            "-w",
            "project_id=1",
            "--where",
            "committed_date>=2024-01-01",
            "--limit",
            "5",
            "--format",
            "pretty",
        ]);
        match cli.command {
            Commands::Query {
                table,
                predicates,
                limit,
                format,
                output,
                explain,
            } => {
                assert_eq!(table, "commit");
                assert_eq!(predicates.len(), 2);
                assert_eq!(limit, Some(5));
                assert_eq!(format, OutputFormat::Pretty);
                assert_eq!(output, None::<PathBuf>);
                assert!(!explain);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_describe_table() {
        let value = describe_table(tables::table("gitlab_commit").unwrap());
        assert_eq!(value["name"], "gitlab_commit");
        assert_eq!(value["required_keys"], json!(["project_id"]));
        assert_eq!(value["page_size"], 50);
        assert_eq!(value["plan"], "first_match");
        assert_eq!(value["columns"][0]["type"], "text");

        let filters = value["filters"].as_array().unwrap();
        assert!(filters
            .iter()
            .any(|f| f["column"] == "committed_date" && f["params"] == json!(["since", "until"])));
    }
}
