// SPDX-License-Identifier: MIT

//! Parking-directory generation and loading tests.

use docycle::services::{ParkingDirectory, PortalClient};

mod common;

#[tokio::test]
async fn test_generate_maps_names_to_ids() {
    let stub = common::StubPortal::start().await;
    stub.set_response(
        common::PARKING_LIST,
        200,
        common::parking_list_page(&[
            ("10119", "35.69", "A1-01.Chiyoda City Office", "5 available"),
            ("10122", "35.70", "A1-04.East Garden", "2 available"),
        ]),
    );
    let mut portal = PortalClient::login(&stub.config()).await.expect("login");

    let directory = ParkingDirectory::generate(&mut portal, vec!["1".to_string()])
        .await
        .expect("generate");

    assert_eq!(directory.len(), 2);
    assert_eq!(directory.get("A1-01.Chiyoda City Office"), Some("10119"));
    assert_eq!(directory.get("A1-04.East Garden"), Some("10122"));
}

#[tokio::test]
async fn test_generate_applies_h1_area_id_swap() {
    let stub = common::StubPortal::start().await;
    // the anomalous station reports the service id as ParkingID and
    // carries the real id in ParkingLat
    stub.set_response(
        common::PARKING_LIST,
        200,
        common::parking_list_page(&[
            ("10119", "35.69", "A1-01.Chiyoda City Office", "5 available"),
            ("TYO", "10250", "H1-55.Odd Station", "2 available"),
        ]),
    );
    let mut portal = PortalClient::login(&stub.config()).await.expect("login");

    let directory = ParkingDirectory::generate(&mut portal, vec!["1".to_string()])
        .await
        .expect("generate");

    assert_eq!(directory.get("A1-01.Chiyoda City Office"), Some("10119"));
    assert_eq!(directory.get("H1-55.Odd Station"), Some("10250"));
}

#[tokio::test]
async fn test_generate_skips_areas_without_stations() {
    let stub = common::StubPortal::start().await;
    // area 1 answers with stations, area 2 with no container at all
    stub.set_response(
        common::PARKING_LIST,
        200,
        common::parking_list_page(&[(
            "10119",
            "35.69",
            "A1-01.Chiyoda City Office",
            "5 available",
        )]),
    );
    stub.push_response(common::PARKING_LIST, 200, common::page_without_container());
    let mut portal = PortalClient::login(&stub.config()).await.expect("login");

    let directory =
        ParkingDirectory::generate(&mut portal, vec!["1".to_string(), "2".to_string()])
            .await
            .expect("generate");

    assert_eq!(directory.len(), 1);
    assert_eq!(stub.count(common::PARKING_LIST), 2);
}

#[tokio::test]
async fn test_save_and_load() {
    let stub = common::StubPortal::start().await;
    stub.set_response(
        common::PARKING_LIST,
        200,
        common::parking_list_page(&[(
            "10119",
            "35.69",
            "A1-01.Chiyoda City Office",
            "5 available",
        )]),
    );
    let mut portal = PortalClient::login(&stub.config()).await.expect("login");
    let directory = ParkingDirectory::generate(&mut portal, vec!["1".to_string()])
        .await
        .expect("generate");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("parking_directory.json");
    directory.save_to_file(&path).expect("save");

    let loaded = ParkingDirectory::load_from_file(&path).expect("load");
    assert_eq!(loaded.get("A1-01.Chiyoda City Office"), Some("10119"));
}
