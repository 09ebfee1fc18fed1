//! Integration tests for the `keys` command.
use facloc::cli::handle_keys_command;
use facloc::keys::KeyLayout;
use facloc::settings::Settings;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Get the path to a test data file
fn data_file(name: &str) -> PathBuf {
    PathBuf::from("tests/data").join(name)
}

#[test]
fn test_handle_keys_command() {
    unsafe { std::env::set_var("FACLOC_LOG_LEVEL", "off") };

    let dir = tempdir().unwrap();
    let sites_out = dir.path().join("sites-keys.csv");
    handle_keys_command(
        KeyLayout::Sites,
        &data_file("sites.csv"),
        &sites_out,
        false,
        Some(Settings::default()),
    )
    .unwrap();
    assert_eq!(
        fs::read_to_string(&sites_out).unwrap(),
        "Name,Lat,Long,lat_long\n\
         Hospital A,-23.55052,-46.633309,-23.55052_-46.633309\n\
         Clinic B,-22.906847,-43.172896,-22.906847_-43.172896\n\
         Centre C,-15.0,-47.9,-15.0_-47.9\n"
    );

    let od_out = dir.path().join("ori-dest-keys.csv");
    handle_keys_command(
        KeyLayout::OriginDestination,
        &data_file("ori-dest.csv"),
        &od_out,
        false,
        Some(Settings::default()),
    )
    .unwrap();
    let contents = fs::read_to_string(&od_out).unwrap();
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Lat_ori,Long_ori,Lat_dest,Long_dest,Patients,origin,destination"
    );
    assert_eq!(
        lines.next().unwrap(),
        "-23.55052,-46.633309,-22.906847,-43.172896,12,\
         -23.55052_-46.633309,-22.906847_-43.172896"
    );

    // The output file now exists, but overwriting can be enabled in the settings
    let settings = Settings {
        overwrite: true,
        ..Settings::default()
    };
    handle_keys_command(
        KeyLayout::OriginDestination,
        &data_file("ori-dest.csv"),
        &od_out,
        false,
        Some(settings),
    )
    .unwrap();

    // Sites layout doesn't fit an origin/destination file
    assert!(
        handle_keys_command(
            KeyLayout::Sites,
            &data_file("ori-dest.csv"),
            &dir.path().join("wrong.csv"),
            false,
            Some(Settings::default()),
        )
        .is_err()
    );
}
