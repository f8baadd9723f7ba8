use crate::{
    cli::{AddArgs, Commands, EditArgs, selected_frequency},
    config::AppConfig,
    core::{
        MoistureSensor, Notification, NotificationKind, Notifier, PlantTracker, SimulatedSensor,
        report::{format_collection, format_plant_card},
    },
    errors::{Error, Result},
    models::{PRESET_FREQUENCIES, parse_percent},
    storage::{PlantRepository, Storage},
};
use chrono::Utc;
use tracing::instrument;

/// Prints notifications as single console lines.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Confirmation => println!("✅ {notification}"),
            NotificationKind::Rejection => eprintln!("❌ {notification}"),
        }
    }
}

/// Opens the configured storage and runs one command against it.
#[instrument(skip_all)]
pub async fn run(command: Commands, config: &AppConfig) -> Result<()> {
    let storage = Storage::open(&config.storage).await?;
    let mut tracker = PlantTracker::open(
        storage,
        ConsoleNotifier,
        SimulatedSensor::new(),
        config.defaults.clone(),
    )
    .await?;
    execute(&mut tracker, command).await
}

/// Runs one command against an open tracker.
pub async fn execute<R, N, S>(tracker: &mut PlantTracker<R, N, S>, command: Commands) -> Result<()>
where
    R: PlantRepository,
    N: Notifier,
    S: MoistureSensor,
{
    let now = Utc::now();
    match command {
        Commands::List => println!("{}", format_collection(tracker.plants(), now)),
        Commands::Show { id } => {
            let plant = tracker.get(&id).ok_or(Error::PlantNotFound { id })?;
            println!("{}", format_plant_card(plant, now));
        }
        Commands::Add(args) => add(tracker, args).await?,
        Commands::Edit(args) => edit(tracker, args).await?,
        Commands::Remove { id } => {
            if tracker.delete(&id).await?.is_none() {
                report_missing(&id);
            }
        }
        Commands::Water { id } => {
            if tracker.water(&id).await?.is_none() {
                report_missing(&id);
            }
        }
        Commands::Moisture { id, level } => {
            let level = parse_percent(&level);
            match tracker.set_moisture(&id, i64::from(level)).await? {
                Some(plant) => println!("Soil moisture of {} is now {level}%", plant.name),
                None => report_missing(&id),
            }
        }
        Commands::Threshold { id, value } => {
            let value = parse_percent(&value);
            match tracker.set_threshold(&id, i64::from(value)).await? {
                Some(plant) => println!("Moisture threshold of {} is now {value}%", plant.name),
                None => report_missing(&id),
            }
        }
        Commands::ReadSensor { id } => {
            if tracker.take_reading(&id).await?.is_none() {
                report_missing(&id);
            }
        }
        Commands::Frequencies => {
            for (days, label) in PRESET_FREQUENCIES {
                println!("{days:>3}  {label}");
            }
            println!("custom  Custom... (use --custom-days)");
        }
    }
    Ok(())
}

async fn add<R, N, S>(tracker: &mut PlantTracker<R, N, S>, args: AddArgs) -> Result<()>
where
    R: PlantRepository,
    N: Notifier,
    S: MoistureSensor,
{
    let draft = tracker.draft_mut();
    draft.name = args.name;
    draft.plant_type = args.plant_type;
    if let Some(frequency) = selected_frequency(args.frequency, args.custom_days.as_deref()) {
        draft.frequency = frequency;
    }
    if let Some(image) = args.image {
        draft.image = image;
    }
    if let Some(level) = args.moisture {
        draft.moisture_level = parse_percent(&level);
    }
    if let Some(threshold) = args.threshold {
        draft.moisture_threshold = parse_percent(&threshold);
    }

    let plant = tracker.add().await?;
    println!("{}", plant.id);
    Ok(())
}

async fn edit<R, N, S>(tracker: &mut PlantTracker<R, N, S>, args: EditArgs) -> Result<()>
where
    R: PlantRepository,
    N: Notifier,
    S: MoistureSensor,
{
    let Some(edit) = tracker.begin_edit(&args.id) else {
        report_missing(&args.id);
        return Ok(());
    };
    if let Some(name) = args.name {
        edit.name = name;
    }
    if let Some(plant_type) = args.plant_type {
        edit.plant_type = plant_type;
    }
    if let Some(frequency) = selected_frequency(args.frequency, args.custom_days.as_deref()) {
        edit.frequency = frequency;
    }
    if let Some(image) = args.image {
        edit.image = image;
    }

    tracker.update().await?;
    Ok(())
}

fn report_missing(id: &str) {
    println!("No plant found with id {id}");
}
