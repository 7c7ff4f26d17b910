use lifewatch_lib::{Catalog, Config, Pattern, StabilityTracker, World, ALIVE_CHAR};
use std::error::Error;

const STABLE: &str = include_str!("data/stable.txt");

fn stable() -> Result<World, Box<dyn Error>> {
    Ok(World::from_plaintext(STABLE, ALIVE_CHAR)?)
}

#[test]
fn load_size() -> Result<(), Box<dyn Error>> {
    let world = stable()?;
    assert_eq!(world.rows(), 20);
    assert_eq!(world.columns(), 100);
    assert_eq!(world.generation(), 0);
    Ok(())
}

#[test]
fn load_cell_count() -> Result<(), Box<dyn Error>> {
    assert_eq!(stable()?.cell_count(), 95);
    Ok(())
}

#[test]
fn census() -> Result<(), Box<dyn Error>> {
    let world = stable()?;
    let catalog = Catalog::still_lifes();
    let matcher = world.matcher();
    assert_eq!(matcher.count(catalog.get("Block")?), 7);
    assert_eq!(matcher.count(catalog.get("Beehive")?), 6);
    assert_eq!(matcher.count(catalog.get("Ship")?), 3);
    assert_eq!(matcher.count(catalog.get("Boat")?), 1);
    assert_eq!(matcher.count(catalog.get("Tub")?), 2);
    assert_eq!(matcher.count(catalog.get("Loaf")?), 0);
    Ok(())
}

#[test]
fn census_in_catalog_order() -> Result<(), Box<dyn Error>> {
    let world = stable()?;
    assert_eq!(
        Catalog::still_lifes().census(&world),
        vec![
            ("Block", 7),
            ("Beehive", 6),
            ("Loaf", 0),
            ("Boat", 1),
            ("Ship", 3),
            ("Tub", 2)
        ]
    );
    Ok(())
}

#[test]
fn window_near_the_edge() -> Result<(), Box<dyn Error>> {
    let world = stable()?;
    let block = Pattern::parse("....\n.XX.\n.XX.\n....")?;
    assert_eq!(world.window(89, 5, 4, 4), block);

    // Columns 98, 99, 0 and 1.
    let window = world.window(98, 0, 4, 20);
    for row in 0..20 {
        for (i, column) in [98, 99, 0, 1].into_iter().enumerate() {
            assert_eq!(window.get(row, i), Some(&world.is_alive((column, row))));
        }
    }
    Ok(())
}

#[test]
fn stable_is_stable() -> Result<(), Box<dyn Error>> {
    let mut world = stable()?;
    let mut tracker = StabilityTracker::new();
    for _ in 0..3 {
        world.advance();
        tracker.observe(&world);
    }
    assert!(tracker.observe(&world));
    assert_eq!(world.generation(), 3);
    assert_eq!(world.to_string(), STABLE);
    Ok(())
}

#[test]
fn full_world_dies() -> Result<(), Box<dyn Error>> {
    let mut world = Config::new(50, 100).set_live_density(1.0).world()?;
    assert_eq!(world.cell_count(), 5000);
    world.advance();
    assert_eq!(world.cell_count(), 0);
    Ok(())
}

#[test]
fn save_and_load() -> Result<(), Box<dyn Error>> {
    let world = Config::new(50, 100).set_seed(7).world()?;
    let text = world.to_plaintext(ALIVE_CHAR, ' ');
    assert_eq!(text.lines().count(), 100);
    let loaded = World::from_plaintext(&text, ALIVE_CHAR)?;
    assert_eq!(loaded.snapshot(), world.snapshot());
    Ok(())
}

#[test]
fn empty_board() {
    assert!(World::from_plaintext("", ALIVE_CHAR).is_err());
}

#[test]
#[cfg(feature = "serde")]
fn config_from_json() -> Result<(), Box<dyn Error>> {
    let config: Config = serde_json::from_str(
        r#"{ "width": 100, "height": 20, "cell_size": 1, "live_density": 0.5 }"#,
    )?;
    assert_eq!(config, Config::new(100, 20));
    let world = config.world()?;
    assert_eq!(world.columns(), 100);
    assert_eq!(world.rows(), 20);

    let partial: Config = serde_json::from_str(r#"{ "live_density": 0.25, "seed": 3 }"#)?;
    assert_eq!(partial, Config::default().set_live_density(0.25).set_seed(3));
    Ok(())
}
