use kvmark::error::AppResult;

fn main() -> AppResult<()> {
    kvmark::run()
}
