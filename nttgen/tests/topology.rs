use nttgen::{Error, PipelineTopology, Stream};

#[test]
fn topology_n1024_b8() {
    let topology: PipelineTopology = PipelineTopology::synthesize(1024, 8).unwrap();

    // log2(1024) - (log2(8) + 1) = 6
    assert_eq!(topology.stage_count(), 6);
    assert_eq!(topology.intermediate_streams().len(), 5);

    let stages = topology.stages();
    assert_eq!(stages[0].inputs, [Stream::Input(0), Stream::Input(1)]);
    assert_eq!(stages[5].outputs, [Stream::Output(0), Stream::Output(1)]);

    for (i, stage) in stages.iter().enumerate() {
        assert_eq!(stage.index, i);
    }
}

#[test]
fn consecutive_stages_share_streams() {
    for (n, b) in [(1024, 8), (4096, 2), (1 << 16, 1), (64, 4)] {
        let topology: PipelineTopology = PipelineTopology::synthesize(n, b).unwrap();
        let stages = topology.stages();
        for w in stages.windows(2) {
            assert_eq!(w[0].outputs, w[1].inputs, "n={} b={}", n, b);
        }

        // Primary streams only appear at the boundaries.
        let primary = |s: &Stream| matches!(s, Stream::Input(_) | Stream::Output(_));
        for stage in &stages[1..] {
            assert!(!stage.inputs.iter().any(primary));
        }
        for stage in &stages[..stages.len() - 1] {
            assert!(!stage.outputs.iter().any(primary));
        }
    }
}

#[test]
fn intermediate_stream_names() {
    let topology: PipelineTopology = PipelineTopology::synthesize(1024, 8).unwrap();
    let names: Vec<String> = topology
        .intermediate_streams()
        .iter()
        .flatten()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(
        names,
        [
            "streams1_0", "streams1_1", "streams2_0", "streams2_1", "streams3_0", "streams3_1",
            "streams4_0", "streams4_1", "streams5_0", "streams5_1",
        ]
    );
}

#[test]
fn deterministic() {
    assert_eq!(
        PipelineTopology::synthesize(1024, 8).unwrap(),
        PipelineTopology::synthesize(1024, 8).unwrap()
    );
}

#[test]
fn spatial_parallelism_covers_everything() {
    // log2(1024) - (log2(512) + 1) = 0
    assert!(matches!(
        PipelineTopology::synthesize(1024, 512),
        Err(Error::NoTemporalStages { log_n: 10, log_b: 9 })
    ));
}
