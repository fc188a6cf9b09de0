//! `_cmsReadFloatOutputTag`: fetch a floating-point output LUT and wrap it
//! with PCS/data-space normalization stages.

/// `cmsSigLabData` (`'Lab '`).
pub const CMS_SIG_LAB_DATA: u32 = 0x4C61_6220;
/// `cmsSigXYZData` (`'XYZ '`).
pub const CMS_SIG_XYZ_DATA: u32 = 0x5859_5A20;
/// `cmsSigRgbData` (`'RGB '`).
pub const CMS_SIG_RGB_DATA: u32 = 0x5247_4220;
/// `cmsSigCmykData` (`'CMYK'`).
pub const CMS_SIG_CMYK_DATA: u32 = 0x434D_594B;
/// `cmsSigBToD0Tag` (`'B2D0'`).
pub const CMS_SIG_BTOD0_TAG: u32 = 0x4232_4430;
/// `cmsSigBToD1Tag` (`'B2D1'`).
pub const CMS_SIG_BTOD1_TAG: u32 = 0x4232_4431;

/// `cmsAT_BEGIN` / `cmsAT_END`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageLocation {
    Begin,
    End,
}

/// The normalization stages `_cmsStageNormalize*Float` create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeStage {
    ToLabFloat,
    ToXyzFloat,
    FromLabFloat,
    FromXyzFloat,
}

/// Profile accessors and pipeline operations the focal method calls.
pub trait ProfileTags {
    type Pipeline;

    /// `cmsGetProfileContextID`
    fn context_id(&self) -> u32;
    /// `cmsPipelineDup(cmsReadTag(profile, sig))`; `None` when the tag is
    /// absent or the copy fails.
    fn read_tag(&mut self, sig: u32) -> Option<Self::Pipeline>;
    /// `cmsGetPCS`
    fn pcs(&self) -> u32;
    /// `cmsGetColorSpace`
    fn color_space(&self) -> u32;
    /// `cmsPipelineInsertStage`; `false` on allocation or insertion failure.
    fn insert_stage(
        &mut self,
        lut: &mut Self::Pipeline,
        at: StageLocation,
        stage: NormalizeStage,
        context_id: u32,
    ) -> bool;
    /// `cmsPipelineFree`
    fn free_pipeline(&mut self, lut: Self::Pipeline);
}

/// Read the float LUT stored under `tag` and normalize its ends.
///
/// Lab or XYZ PCS gets a `To*Float` stage at the beginning. Lab or XYZ data
/// space gets a `From*Float` stage at the end. Any failed insertion frees
/// the copy and yields `None`.
pub fn read_float_output_tag<P: ProfileTags + ?Sized>(
    profile: &mut P,
    tag: u32,
) -> Option<P::Pipeline> {
    let context_id = profile.context_id();
    let lut = profile.read_tag(tag);
    let pcs = profile.pcs();
    let data_space = profile.color_space();
    let mut lut = lut?;

    let begin = match pcs {
        CMS_SIG_LAB_DATA => Some(NormalizeStage::ToLabFloat),
        CMS_SIG_XYZ_DATA => Some(NormalizeStage::ToXyzFloat),
        _ => None,
    };
    let end = match data_space {
        CMS_SIG_LAB_DATA => Some(NormalizeStage::FromLabFloat),
        CMS_SIG_XYZ_DATA => Some(NormalizeStage::FromXyzFloat),
        _ => None,
    };

    for (at, stage) in [(StageLocation::Begin, begin), (StageLocation::End, end)] {
        let Some(stage) = stage else { continue };
        if !profile.insert_stage(&mut lut, at, stage, context_id) {
            profile.free_pipeline(lut);
            return None;
        }
    }
    Some(lut)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Profile {
        pcs: u32,
        space: u32,
        lut: Option<Vec<NormalizeStage>>,
        fail_on: Option<NormalizeStage>,
        freed: u32,
    }

    impl Profile {
        fn new(pcs: u32, space: u32) -> Self {
            Self {
                pcs,
                space,
                lut: Some(Vec::new()),
                fail_on: None,
                freed: 0,
            }
        }
    }

    impl ProfileTags for Profile {
        type Pipeline = Vec<NormalizeStage>;

        fn context_id(&self) -> u32 {
            7
        }

        fn read_tag(&mut self, _sig: u32) -> Option<Vec<NormalizeStage>> {
            self.lut.clone()
        }

        fn pcs(&self) -> u32 {
            self.pcs
        }

        fn color_space(&self) -> u32 {
            self.space
        }

        fn insert_stage(
            &mut self,
            lut: &mut Vec<NormalizeStage>,
            at: StageLocation,
            stage: NormalizeStage,
            _context_id: u32,
        ) -> bool {
            if self.fail_on == Some(stage) {
                return false;
            }
            match at {
                StageLocation::Begin => lut.insert(0, stage),
                StageLocation::End => lut.push(stage),
            }
            true
        }

        fn free_pipeline(&mut self, _lut: Vec<NormalizeStage>) {
            self.freed += 1;
        }
    }

    #[test]
    fn lab_to_xyz_wraps_both_ends() {
        let mut p = Profile::new(CMS_SIG_LAB_DATA, CMS_SIG_XYZ_DATA);
        assert_eq!(
            read_float_output_tag(&mut p, CMS_SIG_BTOD0_TAG),
            Some(vec![NormalizeStage::ToLabFloat, NormalizeStage::FromXyzFloat])
        );
    }

    #[test]
    fn rgb_data_space_has_no_end_stage() {
        let mut p = Profile::new(CMS_SIG_XYZ_DATA, CMS_SIG_RGB_DATA);
        assert_eq!(
            read_float_output_tag(&mut p, CMS_SIG_BTOD0_TAG),
            Some(vec![NormalizeStage::ToXyzFloat])
        );
    }

    #[test]
    fn missing_tag_frees_nothing() {
        let mut p = Profile::new(CMS_SIG_LAB_DATA, CMS_SIG_LAB_DATA);
        p.lut = None;
        assert_eq!(read_float_output_tag(&mut p, CMS_SIG_BTOD0_TAG), None);
        assert_eq!(p.freed, 0);
    }

    #[test]
    fn failed_end_insertion_frees_copy() {
        let mut p = Profile::new(CMS_SIG_LAB_DATA, CMS_SIG_LAB_DATA);
        p.fail_on = Some(NormalizeStage::FromLabFloat);
        assert_eq!(read_float_output_tag(&mut p, CMS_SIG_BTOD0_TAG), None);
        assert_eq!(p.freed, 1);
    }
}
