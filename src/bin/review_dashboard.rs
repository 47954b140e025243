use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    review_insights::example_apps::run_review_dashboard(std::env::args().skip(1))
}
