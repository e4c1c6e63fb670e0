#![no_main]

use libfuzzer_sys::fuzz_target;
use talentlink::{AssociationStore, Config, EntityKind, EntityRef, RelationType};

// Each 4-byte chunk is one operation: opcode, source kind, relation, ids.
fuzz_target!(|data: &[u8]| {
    let store = AssociationStore::new(Config::default()).unwrap();

    for chunk in data.chunks_exact(4) {
        let kind = EntityKind::ALL[chunk[1] as usize % EntityKind::ALL.len()];
        let relation = RelationType::ALL[chunk[2] as usize % RelationType::ALL.len()];
        let source = EntityRef::new(kind, format!("s{}", chunk[3] & 0x0f));
        let target = format!("t{}", chunk[3] >> 4);

        match chunk[0] % 3 {
            0 => {
                store.add_association(&source, relation, target).unwrap();
            }
            1 => {
                store.remove_association(&source, relation, target).unwrap();
            }
            _ => {
                store.detach_entity(&source).unwrap();
            }
        }
    }

    let edges = store.edges().unwrap();
    for edge in &edges {
        assert!(edges.contains(&edge.reversed()), "missing inverse of {edge}");
    }
});
