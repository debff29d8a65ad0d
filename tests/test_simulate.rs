use rand::rngs::StdRng;
use rand::SeedableRng;

use pedigrees::sim_pedigree;
use pedigrees::simulate_pedigree;
use pedigrees::IndividualRow;
use pedigrees::RowSink;
use pedigrees::SimulationParameters;
use pedigrees::TableBuffer;
use pedigrees::NODE_IS_SAMPLE;
use pedigrees::NULL_INDEX;

fn base_parameters() -> SimulationParameters {
    SimulationParameters {
        population_size: 4,
        end_time: 2,
        random_seed: Some(1234),
        sequence_length: None,
    }
}

#[test]
fn emits_three_generations_of_four() {
    let tables = sim_pedigree(&base_parameters()).unwrap();
    // end_time = 2 means generations at times 2, 1, 0.
    assert_eq!(tables.individuals().len(), 12);
    assert_eq!(tables.nodes().len(), 24);
    assert_eq!(tables.num_populations(), 1);
}

#[test]
fn founders_have_sentinel_parents() {
    let tables = sim_pedigree(&base_parameters()).unwrap();
    for row in &tables.individuals()[..4] {
        assert_eq!(row.parents, [NULL_INDEX, NULL_INDEX]);
    }
}

#[test]
fn each_generation_draws_parents_from_the_previous_one() {
    let tables = sim_pedigree(&base_parameters()).unwrap();
    for (index, row) in tables.individuals()[4..8].iter().enumerate() {
        for parent in row.parents {
            assert!((0..4).contains(&parent), "individual {index}: {parent}");
        }
    }
    for row in &tables.individuals()[8..12] {
        for parent in row.parents {
            assert!((4..8).contains(&parent));
        }
    }
}

#[test]
fn only_the_final_generation_is_sampleable() {
    let tables = sim_pedigree(&base_parameters()).unwrap();
    for node in &tables.nodes()[..16] {
        assert_eq!(node.flags, 0);
    }
    for node in &tables.nodes()[16..] {
        assert_eq!(node.flags, NODE_IS_SAMPLE);
    }
}

#[test]
fn node_times_count_down_from_end_time() {
    let tables = sim_pedigree(&base_parameters()).unwrap();
    let times: Vec<f64> = tables.nodes().iter().map(|node| node.time).collect();
    let mut expected = Vec::new();
    for time in [2.0, 1.0, 0.0] {
        expected.extend(std::iter::repeat(time).take(8));
    }
    assert_eq!(times, expected);
}

#[test]
fn two_nodes_per_individual_in_row_order() {
    let tables = sim_pedigree(&base_parameters()).unwrap();
    for (pair, nodes) in tables.nodes().chunks(2).enumerate() {
        assert_eq!(nodes[0].individual, pair as i32);
        assert_eq!(nodes[1].individual, pair as i32);
        assert_eq!(nodes[0].population, 0);
        assert_eq!(nodes[1].population, 0);
    }
}

#[test]
fn sequence_length_passes_through() {
    let parameters = SimulationParameters {
        sequence_length: Some(1e6),
        ..base_parameters()
    };
    let tables = sim_pedigree(&parameters).unwrap();
    assert_eq!(tables.sequence_length(), Some(1e6));
}

#[test]
fn parent_indices_respect_rows_already_in_the_sink() {
    // Rows appended before the run shift every index the sink assigns;
    // emitted parent references must follow the sink, not restart at 0.
    let mut tables = TableBuffer::new(None);
    tables.add_population();
    tables.append_individual(IndividualRow {
        flags: 0,
        parents: [NULL_INDEX, NULL_INDEX],
        metadata: None,
    });

    let parameters = SimulationParameters {
        population_size: 4,
        end_time: 1,
        random_seed: Some(7),
        sequence_length: None,
    };
    let mut rng = StdRng::seed_from_u64(7);
    simulate_pedigree(&parameters, &mut rng, &mut tables).unwrap();

    assert_eq!(tables.individuals().len(), 9);
    // Founders occupy rows 1..=4; the final generation must reference
    // them, never the pre-existing row 0.
    for row in &tables.individuals()[1..5] {
        assert_eq!(row.parents, [NULL_INDEX, NULL_INDEX]);
    }
    for row in &tables.individuals()[5..9] {
        for parent in row.parents {
            assert!((1..5).contains(&parent), "parent index {parent}");
        }
    }
    // Node rows name the owning individual by its sink-assigned index.
    let owners: Vec<i32> = tables.nodes().iter().map(|node| node.individual).collect();
    let expected: Vec<i32> = (1..9).flat_map(|row| [row, row]).collect();
    assert_eq!(owners, expected);
}

#[test]
fn end_time_zero_emits_a_single_sampled_generation() {
    let parameters = SimulationParameters {
        end_time: 0,
        ..base_parameters()
    };
    let tables = sim_pedigree(&parameters).unwrap();
    assert_eq!(tables.individuals().len(), 4);
    assert_eq!(tables.nodes().len(), 8);
    for row in tables.individuals() {
        assert_eq!(row.parents, [NULL_INDEX, NULL_INDEX]);
    }
    for node in tables.nodes() {
        assert_eq!(node.flags, NODE_IS_SAMPLE);
        assert_eq!(node.time, 0.0);
    }
}
