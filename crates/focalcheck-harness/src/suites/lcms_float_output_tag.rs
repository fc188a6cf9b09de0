//! Little CMS `_cmsReadFloatOutputTag`.

use focalcheck_core::lcms::tags::{
    CMS_SIG_BTOD0_TAG, CMS_SIG_BTOD1_TAG, CMS_SIG_CMYK_DATA, CMS_SIG_LAB_DATA, CMS_SIG_RGB_DATA,
    CMS_SIG_XYZ_DATA,
};
use focalcheck_core::lcms::{NormalizeStage, ProfileTags, StageLocation, read_float_output_tag};

use crate::check::CheckContext;
use crate::driver::{Scenario, Suite};
use crate::error::SetupError;
use crate::mock::{CallLog, Stub};
use crate::{expect_eq, expect_true};

const CONTEXT: u32 = 0x10;

/// Stand-in for a `cmsPipeline`: remembers which stages were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FakePipeline {
    id: u32,
    begin: Vec<NormalizeStage>,
    end: Vec<NormalizeStage>,
}

impl FakePipeline {
    fn stored(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

type InsertArgs = (StageLocation, NormalizeStage, u32);

/// A profile whose tag reads and stage insertions are stubbed.
#[derive(Debug)]
struct FakeProfile {
    pcs: u32,
    data_space: u32,
    read_tag: Stub<u32, Option<FakePipeline>>,
    insert_stage: Stub<InsertArgs, bool>,
    freed: CallLog<FakePipeline>,
}

impl FakeProfile {
    fn new(pcs: u32, data_space: u32) -> Self {
        Self {
            pcs,
            data_space,
            read_tag: Stub::returning(Some(FakePipeline::stored(1))),
            insert_stage: Stub::returning(true),
            freed: CallLog::new(),
        }
    }
}

impl ProfileTags for FakeProfile {
    type Pipeline = FakePipeline;

    fn context_id(&self) -> u32 {
        CONTEXT
    }

    fn read_tag(&mut self, sig: u32) -> Option<FakePipeline> {
        self.read_tag.invoke(sig)
    }

    fn pcs(&self) -> u32 {
        self.pcs
    }

    fn color_space(&self) -> u32 {
        self.data_space
    }

    fn insert_stage(
        &mut self,
        lut: &mut FakePipeline,
        at: StageLocation,
        stage: NormalizeStage,
        context_id: u32,
    ) -> bool {
        let inserted = self.insert_stage.invoke((at, stage, context_id));
        if inserted {
            match at {
                StageLocation::Begin => lut.begin.push(stage),
                StageLocation::End => lut.end.push(stage),
            }
        }
        inserted
    }

    fn free_pipeline(&mut self, lut: FakePipeline) {
        self.freed.record(lut);
    }
}

fn missing_tag(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut profile = FakeProfile::new(CMS_SIG_LAB_DATA, CMS_SIG_LAB_DATA);
    profile.read_tag.set_fallback(None);
    let lut = read_float_output_tag(&mut profile, CMS_SIG_BTOD1_TAG);
    expect_eq!(ctx, lut, None);
    expect_eq!(ctx, profile.read_tag.calls(), vec![CMS_SIG_BTOD1_TAG]);
    expect_eq!(ctx, profile.insert_stage.count(), 0);
    expect_eq!(ctx, profile.freed.count(), 0, "nothing to free without a copy");
    Ok(())
}

fn lab_both_ends(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut profile = FakeProfile::new(CMS_SIG_LAB_DATA, CMS_SIG_LAB_DATA);
    let lut = read_float_output_tag(&mut profile, CMS_SIG_BTOD0_TAG);
    expect_eq!(
        ctx,
        lut,
        Some(FakePipeline {
            id: 1,
            begin: vec![NormalizeStage::ToLabFloat],
            end: vec![NormalizeStage::FromLabFloat],
        })
    );
    expect_eq!(
        ctx,
        profile.insert_stage.calls(),
        vec![
            (StageLocation::Begin, NormalizeStage::ToLabFloat, CONTEXT),
            (StageLocation::End, NormalizeStage::FromLabFloat, CONTEXT),
        ]
    );
    Ok(())
}

fn mixed_pcs_and_data_space(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut profile = FakeProfile::new(CMS_SIG_LAB_DATA, CMS_SIG_XYZ_DATA);
    let lut = read_float_output_tag(&mut profile, CMS_SIG_BTOD0_TAG);
    expect_eq!(
        ctx,
        lut.map(|l| (l.begin, l.end)),
        Some((vec![NormalizeStage::ToLabFloat], vec![NormalizeStage::FromXyzFloat]))
    );

    let mut profile = FakeProfile::new(CMS_SIG_XYZ_DATA, CMS_SIG_LAB_DATA);
    let lut = read_float_output_tag(&mut profile, CMS_SIG_BTOD0_TAG);
    expect_eq!(
        ctx,
        lut.map(|l| (l.begin, l.end)),
        Some((vec![NormalizeStage::ToXyzFloat], vec![NormalizeStage::FromLabFloat]))
    );
    Ok(())
}

fn device_spaces_untouched(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut profile = FakeProfile::new(CMS_SIG_RGB_DATA, CMS_SIG_CMYK_DATA);
    profile.read_tag.set_fallback(Some(FakePipeline::stored(42)));
    let lut = read_float_output_tag(&mut profile, CMS_SIG_BTOD0_TAG);
    expect_eq!(ctx, lut, Some(FakePipeline::stored(42)));
    expect_eq!(ctx, profile.insert_stage.count(), 0);
    Ok(())
}

fn begin_failure_frees_copy(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut profile = FakeProfile::new(CMS_SIG_LAB_DATA, CMS_SIG_LAB_DATA);
    profile.insert_stage.then_return(false);
    let lut = read_float_output_tag(&mut profile, CMS_SIG_BTOD0_TAG);
    expect_eq!(ctx, lut, None);
    expect_eq!(ctx, profile.insert_stage.count(), 1, "end stage not attempted");
    expect_eq!(ctx, profile.freed.calls(), vec![FakePipeline::stored(1)]);
    Ok(())
}

fn end_failure_frees_copy(ctx: &mut CheckContext) -> Result<(), SetupError> {
    let mut profile = FakeProfile::new(CMS_SIG_XYZ_DATA, CMS_SIG_XYZ_DATA);
    profile.insert_stage.then_return(true).then_return(false);
    let lut = read_float_output_tag(&mut profile, CMS_SIG_BTOD0_TAG);
    expect_eq!(ctx, lut, None);
    expect_eq!(ctx, profile.freed.count(), 1);
    let freed = profile.freed.last();
    expect_true!(
        ctx,
        freed.is_some_and(|l| l.begin == vec![NormalizeStage::ToXyzFloat] && l.end.is_empty()),
        "the partially built copy is the one freed"
    );
    Ok(())
}

pub fn suite() -> Suite {
    Suite {
        name: "lcms_float_output_tag",
        library: "lcms2",
        focal: "_cmsReadFloatOutputTag",
        scenarios: vec![
            Scenario::new("missing_tag", "absent tag yields no pipeline", missing_tag),
            Scenario::new("lab_both_ends", "Lab PCS and Lab data space", lab_both_ends),
            Scenario::new(
                "mixed_pcs_and_data_space",
                "Lab/XYZ combinations pick matching stages",
                mixed_pcs_and_data_space,
            ),
            Scenario::new(
                "device_spaces_untouched",
                "RGB/CMYK add no normalization",
                device_spaces_untouched,
            ),
            Scenario::new(
                "begin_failure_frees_copy",
                "failed begin insertion frees the copy",
                begin_failure_frees_copy,
            ),
            Scenario::new(
                "end_failure_frees_copy",
                "failed end insertion frees the copy",
                end_failure_frees_copy,
            ),
        ],
    }
}
