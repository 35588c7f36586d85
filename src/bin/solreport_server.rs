//! Solreport API server binary
//!
//! HTTP upload endpoint for the spreadsheet extraction service.

use std::path::PathBuf;

use clap::Parser;
use solreport::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "solreport-server")]
#[command(version)]
#[command(about = "Solreport API server - spreadsheet extraction over HTTP")]
#[command(long_about = r#"
Solreport API Server

Endpoints:
  - POST /upload   - Extract records from an uploaded workbook
                     (multipart fields: file, type)
  - GET  /health   - Health check
  - GET  /version  - Server version info
  - GET  /         - Endpoint inventory

The `type` form field selects the report layout: member-sol, leader-sol,
kpi-sol, or business. The response body is the extracted record list.

Example usage:
  solreport-server                            # Start on localhost:3000
  solreport-server --host 0.0.0.0 --port 8080
  solreport-server --branches branches.yaml

  curl -F file=@results.xlsx -F type=member-sol http://localhost:3000/upload
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SOLREPORT_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "SOLREPORT_PORT")]
    port: u16,

    /// Branch-table YAML for the department report
    #[arg(short, long, env = "SOLREPORT_BRANCHES")]
    branches: Option<PathBuf>,

    /// Scratch directory for uploaded workbooks (system temp by default)
    #[arg(long, env = "SOLREPORT_UPLOAD_DIR")]
    upload_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        branch_file: args.branches,
        upload_dir: args.upload_dir,
    };

    run_api_server(config).await
}
