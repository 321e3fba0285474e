use anyhow::Result;

fn main() -> Result<()> {
    maf_tally::cli::run()
}
