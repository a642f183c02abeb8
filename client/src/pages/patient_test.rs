use super::*;

#[test]
fn medicament_summary_skips_blank_parts() {
    let medicament = Medicament {
        dosage: "500mg".to_owned(),
        frequency: String::new(),
        duration_days: Some(7),
        ..Medicament::default()
    };
    assert_eq!(medicament_summary(&medicament), "500mg · 7 jours");
}

#[test]
fn medicament_summary_singular_day() {
    let medicament = Medicament { dosage: "1 cp".to_owned(), duration_days: Some(1), ..Medicament::default() };
    assert_eq!(medicament_summary(&medicament), "1 cp · 1 jour");
}

#[test]
fn document_type_label_falls_back_to_code() {
    assert_eq!(document_type_label("prescription"), "Ordonnance");
    assert_eq!(document_type_label("scan"), "scan");
}

#[test]
fn medicament_fields_round_trip_through_form_names() {
    let mut draft = MedicamentDraft::default();
    set_medicament_field(&mut draft, "duration_days", " 10 ".to_owned());
    set_medicament_field(&mut draft, "name", "Ibuprofène".to_owned());

    assert_eq!(draft.duration_days, Some(10));
    assert_eq!(medicament_field(&draft, "name"), "Ibuprofène");
    assert_eq!(medicament_field(&draft, "duration_days"), "10");
}
