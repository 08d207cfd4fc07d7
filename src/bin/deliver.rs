const WEBHOOK_API: &'static str = "http://localhost:3000/api/scraper/webhook";

fn print_usage_and_exit() -> ! {
    eprintln!("Usage: deliver <payload.json>");
    std::process::exit(1);
}

fn main() {
    let mut args = std::env::args().skip(1); // 跳过程序名

    let payload_path = args.next().unwrap_or_else(|| {
        eprintln!("Missing <payload.json>");
        print_usage_and_exit();
    });

    if args.next().is_some() {
        eprintln!("Too many arguments provided.");
        print_usage_and_exit();
    }

    let secret = std::env::var("NEWSDESK_WEBHOOK_SECRET").unwrap_or_else(|_| {
        eprintln!("NEWSDESK_WEBHOOK_SECRET not set");
        std::process::exit(1);
    });

    let payload = std::fs::read_to_string(&payload_path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", payload_path, e);
        std::process::exit(1);
    });

    let client = reqwest::blocking::Client::new();
    let res = client
        .post(WEBHOOK_API)
        .header("X-Signature", secret)
        .header("Content-Type", "application/json")
        .body(payload)
        .send();

    match res {
        Ok(resp) => {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            if !status.is_success() {
                eprintln!("❌ Delivery rejected");
                eprintln!("{} | {}", status, text.trim());
                std::process::exit(1);
            } else {
                println!("✅ Delivery accepted");
                println!("{}", text.trim());
            }
        }
        Err(e) => {
            eprintln!("❌ Failed to contact webhook API: {}", e);
            std::process::exit(1);
        }
    }
}
