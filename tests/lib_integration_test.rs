//! Integration tests for the Rows & Cols library public API

use rows_and_cols::{
    game::player::{Lobby, PlayerSetting},
    Coord, Result, RowsAndColsError, TurnEngine, DESCRIPTION, NAME, VERSION,
};

#[test]
fn test_library_metadata() {
    assert!(!VERSION.is_empty());
    assert_eq!(NAME, "rows_and_cols");
    assert!(!DESCRIPTION.is_empty());
}

#[test]
fn test_error_messages() {
    let placement = RowsAndColsError::IllegalPlacement(Coord::new(2, -1));
    assert!(placement.to_string().contains("(2, -1)"));

    let swap = RowsAndColsError::InsufficientBagForSwap { bag_len: 3 };
    assert!(swap.to_string().contains('3'));

    let corrupt = RowsAndColsError::CorruptSaveRecord("missing header line".to_string());
    assert!(matches!(corrupt, RowsAndColsError::CorruptSaveRecord(_)));
}

#[test]
fn test_result_type() -> Result<()> {
    let engine = TurnEngine::with_seed(Lobby::default().seats(), 1)?;
    assert_eq!(engine.state().players.len(), 3);
    assert!(!engine.state().players[0].is_ai());
    Ok(())
}

#[test]
fn test_invalid_setup_is_reported() {
    let seats: Vec<PlayerSetting> = (0..7).map(|i| PlayerSetting::new(format!("P{}", i), true)).collect();
    assert!(matches!(
        TurnEngine::with_seed(&seats, 1),
        Err(RowsAndColsError::InvalidSetup(_))
    ));
}
