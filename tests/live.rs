//! Tests against a running Weighty server. They skip themselves unless
//! `WEIGHTY_BASE_URL` points somewhere.

use chrono::Local;
use weighty_dash::WeightyClient;

fn live_base_url() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var("WEIGHTY_BASE_URL").ok()
}

fn live_client() -> Option<WeightyClient> {
    Some(WeightyClient::new(live_base_url()?))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[tokio::test]
async fn live_profile_and_entries_load() {
    let Some(client) = live_client() else {
        eprintln!("skipping live_profile_and_entries_load: WEIGHTY_BASE_URL not set");
        return;
    };
    init_tracing();

    let profile = client.fetch_profile().await.unwrap();
    assert!(profile.goal_weight > 0.0);

    let page = client.fetch_entries().await.unwrap();
    assert!(page.items.len() as u64 <= page.totals.count);
    // the service lists newest first
    assert!(page.items.windows(2).all(|w| w[0].date >= w[1].date));
}

#[tokio::test]
async fn live_entry_round_trip() -> anyhow::Result<()> {
    let Some(client) = live_client() else {
        eprintln!("skipping live_entry_round_trip: WEIGHTY_BASE_URL not set");
        return Ok(());
    };
    init_tracing();

    let today = Local::now().date_naive();
    let date = today.format("%Y-%m-%d").to_string();

    // Create; the service upserts by date, so reruns are safe
    let outcome = client.create_entry(&date, 81.3).await?;
    assert_eq!(outcome.item.date, today);
    assert!(outcome.charts.is_some(), "POST responses carry charts");

    // Read back and find our entry
    let page = client.fetch_entries().await?;
    let logged = page
        .items
        .iter()
        .find(|e| e.date == today)
        .expect("today's entry should be listed");
    assert!((logged.weight - 81.3).abs() < 1e-6);

    // Update the same row
    let updated = client.update_entry(logged.id, &date, 81.5).await?;
    assert_eq!(updated.item.id, logged.id);
    assert!(updated.charts.is_none(), "PUT responses carry no charts");

    // Export should list the row
    let csv = client.export_csv().await?;
    assert!(csv.starts_with("id,date,weight"));
    assert!(csv.contains(&date));

    // Delete and verify gone
    client.delete_entry(logged.id).await?;
    let page = client.fetch_entries().await?;
    assert!(
        page.items.iter().all(|e| e.id != logged.id),
        "entry should be removed after delete"
    );

    Ok(())
}
