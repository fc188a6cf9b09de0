//! libpcap `gen_mac8host`: 8-bit MAC host filters on ARCnet and MS/TP.

use focalcheck_core::pcap::gencode::{
    DLT_ARCNET, DLT_ARCNET_LINUX, DLT_BACNET_MS_TP, DLT_RAW, FilterCodegen, GencodeError,
    OffsetBase, Q_ADDR1, Q_AND, Q_DEFAULT, Q_DST, Q_OR, Q_SRC, Q_TA, gen_mac8host, mac8_offsets,
};

use crate::check::CheckContext;
use crate::driver::{Scenario, Suite};
use crate::error::SetupError;
use crate::fixtures::FixtureSet;
use crate::mock::CallLog;
use crate::{expect_eq, expect_true};

const DECISION_TABLE: &str = include_str!("../../fixtures/mac8host_offsets.v1.json");
const HOST: u8 = 0x2a;

/// Block produced by the recording codegen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Cmp { offset: u32, value: u8 },
    And(Box<Block>, Box<Block>),
    Or(Box<Block>, Box<Block>),
}

fn cmp(offset: u32) -> Block {
    Block::Cmp {
        offset,
        value: HOST,
    }
}

/// Records every codegen call instead of emitting BPF.
#[derive(Debug, Default)]
struct RecordingCodegen {
    byte_cmp: CallLog<(OffsetBase, u32, u8)>,
    joins: CallLog<&'static str>,
}

impl FilterCodegen for RecordingCodegen {
    type Block = Block;

    fn gen_byte_cmp(&mut self, base: OffsetBase, offset: u32, value: u8) -> Block {
        self.byte_cmp.record((base, offset, value));
        Block::Cmp { offset, value }
    }

    fn gen_and(&mut self, a: Block, b: Block) -> Block {
        self.joins.record("and");
        Block::And(Box::new(a), Box::new(b))
    }

    fn gen_or(&mut self, a: Block, b: Block) -> Block {
        self.joins.record("or");
        Block::Or(Box::new(a), Box::new(b))
    }
}

fn offsets(linktype: i32) -> Result<(u32, u32), GencodeError> {
    mac8_offsets(linktype, "mac8host").map(|o| (o.src_off, o.dst_off))
}

fn arcnet_src(ctx: &mut CheckContext) -> Result<(), SetupError> {
    expect_eq!(ctx, offsets(DLT_ARCNET), Ok((0, 1)));

    let mut cg = RecordingCodegen::default();
    let block = gen_mac8host(&mut cg, DLT_ARCNET, HOST, Q_SRC, "mac8host");
    expect_eq!(ctx, block, Ok(cmp(0)));
    expect_eq!(ctx, cg.byte_cmp.calls(), vec![(OffsetBase::LinkHeader, 0, HOST)]);
    expect_eq!(ctx, cg.joins.count(), 0);
    Ok(())
}

fn bacnet_src(ctx: &mut CheckContext) -> Result<(), SetupError> {
    expect_eq!(ctx, offsets(DLT_BACNET_MS_TP), Ok((4, 3)));

    let mut cg = RecordingCodegen::default();
    let src = gen_mac8host(&mut cg, DLT_BACNET_MS_TP, HOST, Q_SRC, "mac8host");
    expect_eq!(ctx, src, Ok(cmp(4)));
    let dst = gen_mac8host(&mut cg, DLT_BACNET_MS_TP, HOST, Q_DST, "mac8host");
    expect_eq!(ctx, dst, Ok(cmp(3)));
    expect_eq!(ctx, cg.byte_cmp.count(), 2);
    Ok(())
}

fn raw_is_unsupported(ctx: &mut CheckContext) -> Result<(), SetupError> {
    expect_true!(ctx, offsets(DLT_RAW).is_err(), "DLT_RAW must not resolve offsets");

    let mut cg = RecordingCodegen::default();
    let err = gen_mac8host(&mut cg, DLT_RAW, HOST, Q_DEFAULT, "mac8host");
    expect_eq!(
        ctx,
        err.map_err(|e| e.to_string()),
        Err("'mac8host' not supported on RAW".to_string())
    );
    expect_eq!(ctx, cg.byte_cmp.count(), 0, "no code emitted for a rejected linktype");
    expect_eq!(ctx, cg.joins.count(), 0);
    Ok(())
}

fn combined_directions(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut cg = RecordingCodegen::default();
    let both = gen_mac8host(&mut cg, DLT_ARCNET_LINUX, HOST, Q_AND, "mac8host");
    expect_eq!(ctx, both, Ok(Block::And(Box::new(cmp(0)), Box::new(cmp(1)))));

    let either = gen_mac8host(&mut cg, DLT_ARCNET_LINUX, HOST, Q_OR, "mac8host");
    expect_eq!(ctx, either, Ok(Block::Or(Box::new(cmp(0)), Box::new(cmp(1)))));

    let default = gen_mac8host(&mut cg, DLT_ARCNET_LINUX, HOST, Q_DEFAULT, "mac8host");
    expect_eq!(ctx, default, Ok(Block::Or(Box::new(cmp(0)), Box::new(cmp(1)))));

    expect_eq!(ctx, cg.joins.calls(), vec!["and", "or", "or"]);
    expect_eq!(ctx, cg.byte_cmp.count(), 6);
    Ok(())
}

fn wlan_qualifiers_rejected(ctx: &mut CheckContext) -> Result<(), SetupError> {
    for (dir, keyword) in [(Q_ADDR1, "addr1"), (Q_TA, "ta")] {
        let mut cg = RecordingCodegen::default();
        let result = gen_mac8host(&mut cg, DLT_ARCNET, HOST, dir, "mac8host");
        expect_eq!(
            ctx,
            result,
            Err(GencodeError::InvalidDirection {
                qualifier: keyword.to_string(),
                context: "mac8host".to_string(),
            })
        );
        expect_eq!(ctx, cg.joins.count(), 0);
    }
    Ok(())
}

fn decision_table(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let table = FixtureSet::from_json(DECISION_TABLE)
        .map_err(|e| SetupError::fixture("mac8host_offsets.v1", e.to_string()))?;
    expect_eq!(ctx, table.focal.as_str(), "gen_mac8host");

    for case in &table.cases {
        let linktype = i32::try_from(case.input_i64("linktype")?)
            .map_err(|_| SetupError::fixture(&case.name, "linktype out of range"))?;
        let dir = u8::try_from(case.input_i64("dir")?)
            .map_err(|_| SetupError::fixture(&case.name, "dir out of range"))?;
        let success = case.expected_bool("success")?;

        let mut cg = RecordingCodegen::default();
        let result = gen_mac8host(&mut cg, linktype, HOST, dir, "mac8host");
        expect_eq!(ctx, result.is_ok(), success, "case {}", case.name);

        if let (Ok(offsets), Some(src), Some(dst)) = (
            mac8_offsets(linktype, "mac8host"),
            case.expected_i64("src_off"),
            case.expected_i64("dst_off"),
        ) {
            expect_eq!(ctx, i64::from(offsets.src_off), src, "case {}", case.name);
            expect_eq!(ctx, i64::from(offsets.dst_off), dst, "case {}", case.name);
        }
    }
    Ok(())
}

pub fn suite() -> Suite {
    Suite {
        name: "pcap_mac8host",
        library: "libpcap",
        focal: "gen_mac8host",
        scenarios: vec![
            Scenario::new("arcnet_src", "ARCnet source byte sits at offset 0", arcnet_src),
            Scenario::new("bacnet_src", "MS/TP swaps the address bytes", bacnet_src),
            Scenario::new(
                "raw_is_unsupported",
                "non-8-bit linktypes fail without emitting code",
                raw_is_unsupported,
            ),
            Scenario::new(
                "combined_directions",
                "and/or/default join both comparisons",
                combined_directions,
            ),
            Scenario::new(
                "wlan_qualifiers_rejected",
                "802.11 qualifiers are invalid here",
                wlan_qualifiers_rejected,
            ),
            Scenario::new(
                "decision_table",
                "JSON table of linktype/direction outcomes",
                decision_table,
            ),
        ],
    }
}
