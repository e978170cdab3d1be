//! Prints the dataset sorted by a column and optionally submits one record.
//!
//! usage: viewer-demo [COLUMN [desc]] [--add age,pregnancies,glucose,bloodPressure,insulin,bmi,skinThickness,dpf]

use anyhow::{bail, Context, Result};
use recordstore::{FormField, SortDirection};
use viewer::{SubmitOutcome, Viewer, ViewerClient};

fn base_url() -> Result<String> {
    let url = std::env::var("RECORDS_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    if !url.starts_with("http://") && !url.starts_with("https://") {
        bail!("RECORDS_BASE_URL must start with http:// or https://");
    }
    Ok(url)
}

fn print_table(viewer: &Viewer) {
    let header: Vec<String> = viewer
        .columns()
        .iter()
        .map(|c| match viewer.sort_indicator(c) {
            Some(SortDirection::Ascending) => format!("{c} ▲"),
            Some(SortDirection::Descending) => format!("{c} ▼"),
            None => c.clone(),
        })
        .collect();
    println!("{}", header.join("\t"));

    for row in viewer.rows() {
        let cells: Vec<String> = viewer
            .columns()
            .iter()
            .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        println!("{}", cells.join("\t"));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let add = match args.iter().position(|a| a == "--add") {
        Some(i) => {
            let values = args.get(i + 1).cloned().context("--add needs a comma separated value list")?;
            args.drain(i..=i + 1);
            Some(values)
        }
        None => None,
    };

    let mut viewer = Viewer::new(ViewerClient::new(base_url()?));
    viewer.load().await.context("loading dataset")?;

    if let Some(values) = add {
        let values: Vec<&str> = values.split(',').collect();
        if values.len() != FormField::ALL.len() {
            bail!("--add expects {} values, got {}", FormField::ALL.len(), values.len());
        }
        for (field, v) in FormField::ALL.into_iter().zip(values) {
            viewer.form_mut().set(field, v);
        }
        match viewer.submit().await.context("submitting record")? {
            SubmitOutcome::Refreshed => println!("Data added successfully!"),
            SubmitOutcome::RefreshFailed => println!("Data added, but the table could not be refreshed"),
        }
    }

    if let Some(col) = args.first() {
        viewer.sort(col);
        if args.get(1).map(String::as_str) == Some("desc") {
            viewer.sort(col);
        }
    }

    print_table(&viewer);
    Ok(())
}
