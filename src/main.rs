use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = filer::cli::parse();
    app::run(args)
}
