//! One writer, many readers, read-after-write.

use super::common::*;
use folio::EntryId;
use std::sync::Arc;
use std::thread;

#[test]
fn test_writer_sees_its_own_writes() {
    let engine = engine();
    for i in 0..100 {
        engine
            .add_or_update(make_entry(i, &format!("revision{} fresh", i)))
            .unwrap();
        let results = search(&engine, &format!("revision{}", i));
        assert_eq!(results.entry_ids(), vec![EntryId(i)]);
    }
}

#[test]
fn test_readers_never_see_both_versions() {
    let engine = Arc::new(engine());
    engine.add_or_update(make_entry(1, "alpha")).unwrap();

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for i in 0..300 {
                let body = if i % 2 == 0 { "omega" } else { "alpha" };
                engine.add_or_update(make_entry(1, body)).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..300 {
                    let snapshot = engine.snapshot().unwrap();
                    let alpha = snapshot.document_frequency("alpha");
                    let omega = snapshot.document_frequency("omega");
                    assert_eq!(alpha + omega, 1);
                    assert_eq!(snapshot.len(), 1);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn test_concurrent_writers_serialize() {
    let engine = Arc::new(engine());
    let writers: Vec<_> = (0..4)
        .map(|t| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for i in 0..25 {
                    let id = t * 100 + i;
                    engine.add_or_update(make_entry(id, "parallel writes")).unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }
    assert_eq!(engine.document_count(None).unwrap(), 100);
    assert_eq!(search(&engine, "parallel").total, 100);
}
