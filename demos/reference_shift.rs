use kanban_sim::core::sizing::{seed_initial_stock, size_optimal_stock};
use kanban_sim::core::station::StationRegistry;
use kanban_sim::observers::csv_recorder::default_export_path;
use kanban_sim::observers::{ConsoleReporter, CsvRecorder, StockSeries};
use kanban_sim::{
    simulate_shift, ConcurrencyMode, LineConfig, OptimalStock, ReplicationConfig, ShiftObserver,
    StationId, Stock,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    println!("Starting Kanban line simulation (reference plant, virtual clock)");

    let base = LineConfig::reference().with_random_seed(Some(42));

    // Lead times come from the registry so they use the same seeded samplers as the run
    let lead_times = StationRegistry::from_config(&base, &OptimalStock::new())?.lead_times();
    let optimal_stock = size_optimal_stock(&base, &lead_times, 0.3);
    println!("Optimal stock levels: {:?}", optimal_stock);

    let config = seed_initial_stock(base, &optimal_stock)
        .with_initial_stock(StationId::Cutting, Stock::Finite(25));
    config.validate()?;

    let export_path = default_export_path();
    let mut recorder = CsvRecorder::create(&export_path)?;
    let mut console = ConsoleReporter::new(600);
    let mut series = StockSeries::new();

    let report = {
        let mut observers: [&mut dyn ShiftObserver; 3] =
            [&mut recorder, &mut console, &mut series];
        simulate_shift(&config, &optimal_stock, &mut observers)?
    };
    recorder.finish()?;

    println!("\nShift {}: {}", report.run_id, report.outcome);
    println!("Rows exported to {}", export_path.display());
    if let (Some(first), Some(last)) = (series.times().first(), series.times().last()) {
        println!("Stock series: {} samples from t={:.0} to t={:.0}", series.len(), first, last);
    }
    for id in StationId::ALL {
        println!(
            "  {:<9} lowest resource stock: {}",
            id.label(),
            series.minimum(id).map_or("unbounded".to_string(), |m| m.to_string())
        );
    }

    let batch = ReplicationConfig::new(32)
        .with_concurrency(ConcurrencyMode::Rayon)
        .with_seed_base(1000);
    let (_, summary) = kanban_sim::run_replications(&config, &optimal_stock, &batch)?;
    println!(
        "\n{} independent shifts: {:.0}% sustained the full shift, starvations {:?}",
        summary.runs,
        summary.completion_rate() * 100.0,
        summary.starvations
    );

    Ok(())
}
