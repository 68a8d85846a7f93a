use clap::{Parser, Subcommand};
use plantdb::{codec, view, AddOutcome, Category, Plant, Status, Store};
use std::path::PathBuf;
use std::process;

/// Name of the durable slot file inside the data directory.
const SLOT_FILE: &str = "plants.json";

/// plantdb CLI — manage a plant collection stored in a single JSON slot
#[derive(Parser)]
#[command(name = "plantdb", version, about)]
struct Cli {
    /// Path to the data directory (default: current directory)
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a plant to the collection
    Add {
        #[arg(long)]
        name: String,
        /// One of the fixed categories (e.g. Succulents, Tropical, Indoor)
        #[arg(long)]
        category: String,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        variety: Option<String>,
        #[arg(long)]
        image_url: String,
        /// e.g. "Once a week"
        #[arg(long)]
        watering: String,
        /// e.g. "Bright indirect light"
        #[arg(long)]
        sunlight: String,
        #[arg(long)]
        description: String,
        /// Put the plant on the wishlist instead of the owned collection
        #[arg(long)]
        wishlist: bool,
    },

    /// Show a single plant by id
    Get {
        id: String,
    },

    /// List plants
    List {
        /// Only wishlist plants
        #[arg(long)]
        wishlist: bool,
        /// Only owned plants
        #[arg(long)]
        owned: bool,
        /// Only plants in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Edit fields of an existing plant
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        variety: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        watering: Option<String>,
        #[arg(long)]
        sunlight: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Move a wishlist plant into the owned collection
    MarkOwned {
        id: String,
    },

    /// Delete a plant
    Delete {
        id: String,
    },

    /// Species and variety overview
    Species,

    /// Plant counts per category
    Categories,

    /// Dashboard statistics
    Stats,

    /// Write a dated backup of the collection
    Export {
        /// Directory to write the backup into (default: the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replace the whole collection with the contents of a backup file
    Import {
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("ERROR:{e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::open(cli.data_dir.join(SLOT_FILE));

    match cli.command {
        Command::Add {
            name,
            category,
            species,
            variety,
            image_url,
            watering,
            sunlight,
            description,
            wishlist,
        } => {
            let mut plant = Plant::new(name, category.parse::<Category>()?);
            plant.species = species;
            plant.variety = variety;
            plant.image_url = image_url;
            plant.watering_frequency = watering;
            plant.sunlight_requirement = sunlight;
            plant.description = description;
            if wishlist {
                plant.status = Status::Wishlist;
            }

            match store.add(plant)? {
                AddOutcome::Added { id } => {
                    print_json(&serde_json::json!({ "ok": true, "id": id }));
                }
                AddOutcome::Promoted { id } => {
                    print_json(&serde_json::json!({
                        "ok": true,
                        "id": id,
                        "promoted_from_wishlist": true,
                    }));
                }
            }
        }

        Command::Get { id } => {
            let plant = store.require(&id)?;
            print_json(&serde_json::to_value(plant)?);
        }

        Command::List {
            wishlist,
            owned,
            category,
        } => {
            let category = category
                .map(|c| c.parse::<Category>())
                .transpose()?;

            let plants: Vec<&Plant> = if wishlist {
                view::wishlist(store.plants())
            } else if owned {
                view::owned(store.plants())
            } else {
                store.plants().iter().collect()
            };
            let plants: Vec<&Plant> = plants
                .into_iter()
                .filter(|p| category.map_or(true, |c| p.category == c))
                .collect();

            print_json(&serde_json::to_value(plants)?);
        }

        Command::Update {
            id,
            name,
            category,
            species,
            variety,
            image_url,
            watering,
            sunlight,
            description,
        } => {
            let mut plant = store.require(&id)?.clone();
            if let Some(name) = name {
                plant.name = name;
            }
            if let Some(category) = category {
                plant.category = category.parse()?;
            }
            if species.is_some() {
                plant.species = species;
            }
            if variety.is_some() {
                plant.variety = variety;
            }
            if let Some(image_url) = image_url {
                plant.image_url = image_url;
            }
            if let Some(watering) = watering {
                plant.watering_frequency = watering;
            }
            if let Some(sunlight) = sunlight {
                plant.sunlight_requirement = sunlight;
            }
            if let Some(description) = description {
                plant.description = description;
            }

            store.update(plant)?;
            print_json(&serde_json::json!({ "ok": true, "id": id }));
        }

        Command::MarkOwned { id } => {
            store.require(&id)?;
            store.mark_owned(&id);
            print_json(&serde_json::json!({ "ok": true, "id": id, "status": "owned" }));
        }

        Command::Delete { id } => {
            let deleted = store.delete(&id);
            print_json(&serde_json::json!({ "ok": true, "deleted": deleted }));
        }

        Command::Species => {
            let stats = view::species_stats(store.plants());
            print_json(&serde_json::to_value(stats)?);
        }

        Command::Categories => {
            let mut counts = serde_json::Map::new();
            for (category, count) in view::category_counts(store.plants()) {
                counts.insert(category.to_string(), count.into());
            }
            print_json(&serde_json::Value::Object(counts));
        }

        Command::Stats => {
            let stats = view::dashboard_stats(store.plants());
            print_json(&serde_json::to_value(stats)?);
        }

        Command::Export { out } => {
            let dir = out.unwrap_or(cli.data_dir);
            let path = codec::write_backup(store.plants(), &dir)?;
            print_json(&serde_json::json!({ "ok": true, "path": path.display().to_string() }));
        }

        Command::Import { file } => {
            let input = std::fs::read_to_string(&file)
                .map_err(|e| format!("Failed to read import file '{}': {e}", file.display()))?;
            let imported = store.import(&input)?;
            print_json(&serde_json::json!({ "ok": true, "imported": imported }));
        }
    }

    Ok(())
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap());
}
