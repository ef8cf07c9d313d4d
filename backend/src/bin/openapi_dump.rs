//! Print the OpenAPI document as JSON, or YAML with `--yaml`.

use clap::Parser;
use color_eyre::eyre::Result;
use guestbook::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the guestbook OpenAPI document")]
struct Args {
    /// Emit YAML instead of pretty JSON.
    #[arg(long)]
    yaml: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let doc = ApiDoc::openapi();
    let rendered = if args.yaml {
        doc.to_yaml()?
    } else {
        doc.to_pretty_json()?
    };
    println!("{rendered}");
    Ok(())
}
