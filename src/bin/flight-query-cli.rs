use clap::Parser;

#[derive(Parser)]
#[command(name = "flight-query-cli")]
#[command(about = "Query a running flight-query server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Keep flights with air time above this many minutes
    #[arg(short, long)]
    airtime_min: Option<i64>,

    /// Include flight dates
    #[arg(short, long)]
    date: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(min) = cli.airtime_min {
        query.push(("airtime_min", min.to_string()));
    }
    if cli.date {
        query.push(("date", "true".to_string()));
    }

    let res = client.get(&cli.url).query(&query).send().await?;
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let header = |name: &str| {
        res.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("?")
            .to_string()
    };
    println!("total: {}", header("x-total-records"));
    println!("returned: {}", header("x-returned-records"));
    println!();
    println!("{}", res.text().await?);
    Ok(())
}
