//! Writers for synthetic ColabFold bundles used across the engine and workflow tests.

use std::fs;
use std::path::Path;

pub(crate) const MODEL_TYPE: &str = "alphafold2_multimer_v3";

/// One run inside a bundle: its name, the `.a3m` header line and the residue count the
/// header implies.
pub(crate) struct RunFixture<'a> {
    pub name: &'a str,
    pub header: &'a str,
    pub residues: usize,
}

pub(crate) fn write_config(dir: &Path, num_models: usize, num_relax: usize) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("config.json"),
        format!(
            r#"{{"model_type": "{MODEL_TYPE}", "num_models": {num_models}, "num_relax": {num_relax}, "msa_mode": "mmseqs2_uniref_env"}}"#
        ),
    )
    .unwrap();
}

pub(crate) fn rank_token(rank: usize) -> String {
    format!("{rank:03}_{MODEL_TYPE}_model_{}_seed_000", 6 - rank.min(5))
}

pub(crate) fn scores_json(residues: usize, ptm: f64) -> String {
    let plddt: Vec<String> = (0..residues)
        .map(|i| format!("{:.1}", 50.0 + i as f64))
        .collect();
    let row = vec!["1.5"; residues].join(", ");
    let pae: Vec<String> = (0..residues).map(|_| format!("[{row}]")).collect();
    format!(
        r#"{{"max_pae": 31.75, "pae": [{}], "plddt": [{}], "ptm": {ptm}, "iptm": 0.5}}"#,
        pae.join(", "),
        plddt.join(", ")
    )
}

/// Writes marker, MSA, structure and score files for `run`. Ranks up to `num_relax` also
/// get a relaxed structure.
pub(crate) fn write_run(dir: &Path, run: &RunFixture, num_models: usize, num_relax: usize) {
    fs::write(dir.join(format!("{}.done.txt", run.name)), "").unwrap();
    fs::write(
        dir.join(format!("{}.a3m", run.name)),
        format!("{}\n>101\nMKV\n", run.header),
    )
    .unwrap();

    for rank in 1..=num_models {
        let token = rank_token(rank);
        fs::write(
            dir.join(format!("{}_unrelaxed_rank_{token}.pdb", run.name)),
            "ATOM\n",
        )
        .unwrap();
        if rank <= num_relax {
            fs::write(
                dir.join(format!("{}_relaxed_rank_{token}.pdb", run.name)),
                "ATOM\n",
            )
            .unwrap();
        }
        fs::write(
            dir.join(format!("{}_scores_rank_{token}.json", run.name)),
            scores_json(run.residues, 0.9 - 0.1 * rank as f64),
        )
        .unwrap();
    }
}

pub(crate) fn write_bundle(dir: &Path, runs: &[RunFixture], num_models: usize, num_relax: usize) {
    write_config(dir, num_models, num_relax);
    for run in runs {
        write_run(dir, run, num_models, num_relax);
    }
}

pub(crate) fn dimer(name: &str) -> RunFixture<'_> {
    RunFixture {
        name,
        header: "#3,2\t1,1",
        residues: 5,
    }
}
