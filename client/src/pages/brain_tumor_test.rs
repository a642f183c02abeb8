use super::*;

fn result() -> SegmentationResult {
    SegmentationResult {
        original_image: "AAA".to_owned(),
        segmentation_mask: "BBB".to_owned(),
        comparison_image: "CCC".to_owned(),
        processing_time: 1.5,
    }
}

#[test]
fn artifacts_cover_all_three_images_in_order() {
    let items = artifacts(&result(), 1_700_000_000_000);

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].url, "data:image/png;base64,AAA");
    assert_eq!(items[1].filename, "segmentation_mask_1700000000000.png");
    assert_eq!(items[2].label, "Comparaison");
}
