use crate::{
    Animator, Ease, Error, Length, NodeId, Prop, Result, RevealerOptions, Timeline, TimelineId,
    Tween,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Caption {
    pub(crate) title: NodeId,
    pub(crate) meta: NodeId,
    pub(crate) more: NodeId,
    pub(crate) chars: Vec<NodeId>,
}

/// The detail view of one menu entry: title, number badge, gallery and captions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentEntry {
    pub(crate) index: usize,
    pub(crate) el: NodeId,
    pub(crate) title: NodeId,
    pub(crate) number: NodeId,
    pub(crate) images: Vec<NodeId>,
    pub(crate) captions: Vec<Caption>,
}

impl ContentEntry {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn element(&self) -> NodeId {
        self.el
    }

    pub fn title(&self) -> NodeId {
        self.title
    }

    pub fn number(&self) -> NodeId {
        self.number
    }

    pub fn images(&self) -> &[NodeId] {
        &self.images
    }

    pub fn caption_titles(&self) -> Vec<NodeId> {
        self.captions.iter().map(|c| c.title).collect()
    }

    pub fn caption_metas(&self) -> Vec<NodeId> {
        self.captions.iter().map(|c| c.meta).collect()
    }

    pub fn caption_mores(&self) -> Vec<NodeId> {
        self.captions.iter().map(|c| c.more).collect()
    }

    /// Every caption node: titles, metas, then "more" affordances.
    pub fn caption_nodes(&self) -> Vec<NodeId> {
        let mut nodes = self.caption_titles();
        nodes.extend(self.caption_metas());
        nodes.extend(self.caption_mores());
        nodes
    }

    /// The pointer entered the "more" affordance of gallery item `pos`.
    ///
    /// Shrinks the image slightly and fans the caption title's characters out.
    pub fn more_enter<A: Animator + ?Sized>(
        &self,
        pos: usize,
        options: &RevealerOptions,
        animator: &mut A,
    ) -> Result<TimelineId> {
        let (img, chars) = self.more_targets(pos, animator)?;
        let mut timeline = Timeline::new(options.more_enter_duration_ms, Ease::ExpoOut)
            .tween(Tween::to([img], [Prop::Scale(0.95)]), 0);
        for (i, &ch) in chars.iter().enumerate() {
            let shift = i as f32 * options.more_char_shift_px;
            timeline = timeline.tween(Tween::to([ch], [Prop::X(Length::Px(shift))]), 0);
        }
        Ok(animator.play(timeline)?)
    }

    /// The pointer left the "more" affordance of gallery item `pos`.
    pub fn more_leave<A: Animator + ?Sized>(
        &self,
        pos: usize,
        options: &RevealerOptions,
        animator: &mut A,
    ) -> Result<TimelineId> {
        let (img, chars) = self.more_targets(pos, animator)?;
        let timeline = Timeline::new(options.more_leave_duration_ms, Ease::ExpoOut)
            .tween(Tween::to([img], [Prop::Scale(1.0)]), 0)
            .tween(Tween::to(chars.iter().copied(), [Prop::X(Length::Px(0.0))]), 0);
        Ok(animator.play(timeline)?)
    }

    /// Looks up the image and title characters of item `pos` and kills their tweens.
    fn more_targets<A: Animator + ?Sized>(
        &self,
        pos: usize,
        animator: &mut A,
    ) -> Result<(NodeId, &[NodeId])> {
        let count = self.images.len();
        let (Some(&img), Some(caption)) = (self.images.get(pos), self.captions.get(pos)) else {
            return Err(Error::IndexOutOfRange { index: pos, count });
        };
        let mut targets = Vec::with_capacity(caption.chars.len() + 1);
        targets.push(img);
        targets.extend_from_slice(&caption.chars);
        animator.kill_tweens_of(&targets);
        Ok((img, &caption.chars))
    }
}
