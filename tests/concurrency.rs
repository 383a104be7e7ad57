mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use browscap::{Browscap, Capabilities, Catalog, Entry};
use common::*;

const THREADS: usize = 16;

#[test]
fn test_concurrent_first_lookups_agree() {
    let service = service();
    let barrier = Barrier::new(THREADS);

    let results: Vec<Vec<(String, usize)>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    known_user_agents()
                        .into_iter()
                        .map(|ua| {
                            let hit = service.lookup(ua).unwrap().unwrap();
                            let caps: &Capabilities = &hit;
                            (caps.browser.clone(), caps as *const Capabilities as usize)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Every thread saw the same resolved record, down to its address.
    for other in &results[1..] {
        assert_eq!(other, &results[0]);
    }
    for ua in known_user_agents() {
        let hit = service.lookup(ua).unwrap().unwrap();
        assert!(hit.catalog().records().get(hit.id()).unwrap().is_resolved());
    }
}

fn generation(browser: &str, version: &str) -> Catalog {
    Catalog::build(vec![Entry::section("Mozilla/5.0*").with_property("Browser", browser)])
        .unwrap()
        .with_version(Some(version.to_string()))
}

#[test]
fn test_lookups_during_reload() {
    let service = Arc::new(Browscap::new());
    service.replace(generation("Firefox", "1"));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                for _ in 0..2_000 {
                    let hit = service.lookup("Mozilla/5.0 (X11; Linux x86_64)").unwrap().unwrap();
                    let expected = match hit.catalog().version() {
                        Some("1") => "Firefox",
                        Some("2") => "Chrome",
                        other => panic!("unexpected generation {other:?}"),
                    };
                    assert_eq!(hit.browser, expected);
                }
            })
        })
        .collect();

    for i in 0..200 {
        let next = if i % 2 == 0 {
            generation("Chrome", "2")
        } else {
            generation("Firefox", "1")
        };
        service.replace(next);
    }

    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn test_concurrent_init_builds_once() {
    let service = Browscap::new();
    let barrier = Barrier::new(THREADS);

    let installed = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    service.init_from_file(&fixture_path(), false).unwrap()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&installed| installed)
            .count()
    });

    assert_eq!(installed, 1);
    assert!(service.lookup(MAC_OSX_CHROME).unwrap().is_some());
}
