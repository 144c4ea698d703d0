use recruitment_workbench::config::Config;
use recruitment_workbench::Workbench;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config = Config::from_env()?;
    info!(api_base_url = %config.api_base_url, "starting workbench");

    let workbench = Workbench::new(&config)?;

    let vagas = workbench.workbook_service.list_open_vagas().await?;
    info!(count = vagas.len(), "open vagas");
    for vaga in vagas.iter().take(10) {
        info!(id = vaga.id, title = %vaga.title, status = ?vaga.status, "vaga");
    }

    let workbooks = workbench.workbook_service.list_workbooks().await?;
    info!(count = workbooks.len(), "workbooks");
    for workbook in &workbooks {
        info!(
            id = %workbook.id,
            vaga_id = workbook.vaga_id,
            status = ?workbook.status,
            prospects = workbook.total_prospects.unwrap_or(0),
            "workbook"
        );
    }

    match workbench.workbook_service.workbooks_summary().await {
        Ok(summary) => info!(total = summary.total_workbooks, "prospects summary"),
        Err(e) => tracing::warn!(error = %e, "summary unavailable"),
    }

    Ok(())
}
