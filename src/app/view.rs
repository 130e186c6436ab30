use super::messages::Message;
use super::state::{App, CONTENT_SCROLL_ID, CONTENT_SPACING_PX, PAGE_HEADER_HEIGHT_PX, SIDEBAR_WIDTH_PX};
use finlit_core::config::ThemeMode;
use finlit_core::section::SectionDescriptor;
use iced::alignment::Vertical;
use iced::widget::text::LineHeight;
use iced::widget::{
    Column, Row, Space, button, column, container, horizontal_space, progress_bar, row, scrollable,
    text,
};
use iced::{Element, Length};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let mut layout: Column<'_, Message> = column![self.top_bar()].spacing(8).padding(12);

        if let Some(error) = &self.page_error {
            layout = layout.push(
                row![
                    text(error.as_str()),
                    horizontal_space(),
                    button("Dismiss")
                        .style(button::text)
                        .on_press(Message::DismissPageError),
                ]
                .align_y(Vertical::Center),
            );
        }

        let mut body: Row<'_, Message> = row![].spacing(16).height(Length::Fill);
        if self.config.show_sidebar {
            body = body.push(self.sidebar());
        }
        body = body.push(self.lesson_content());

        layout.push(body).into()
    }

    fn top_bar(&self) -> Element<'_, Message> {
        let done_label = format!(
            "{} of {} sections done",
            self.session.completed_count(),
            self.session.total_sections()
        );
        let progress = self.session.progress();
        let theme_label = match self.config.theme {
            ThemeMode::Night => "Day Mode",
            ThemeMode::Day => "Night Mode",
        };
        let sidebar_label = if self.config.show_sidebar {
            "Hide Sections"
        } else {
            "Show Sections"
        };

        let status = row![
            text(self.session.content().title.as_str()).size(20.0),
            horizontal_space(),
            text(done_label),
            text(format!("{:.0}% read", progress.percent())),
            button(sidebar_label).on_press(Message::ToggleSidebar),
            button(theme_label).on_press(Message::ToggleTheme),
        ]
        .spacing(12)
        .align_y(Vertical::Center);

        column![
            status,
            progress_bar(0.0..=1.0, progress.fraction()).height(Length::Fixed(6.0)),
        ]
        .spacing(6)
        .into()
    }

    fn sidebar(&self) -> Element<'_, Message> {
        let mut sections: Column<'_, Message> = column![text("Sections").size(16.0)].spacing(4);
        for section in self.session.content().registry.iter() {
            let id = section.id.as_str();
            let mut label = format!("{} {}", section.emoji, section.title);
            if self.session.is_complete(id) {
                label.push_str(" ✓");
            }
            if self.session.is_bookmarked(id) {
                label.push_str(" ★");
            }
            let style = if self.session.is_active(id) {
                button::primary
            } else {
                button::text
            };
            sections = sections.push(
                button(text(label.trim_start().to_string()))
                    .width(Length::Fill)
                    .style(style)
                    .on_press(Message::NavigateTo(section.id.clone())),
            );
        }

        let mut pages: Column<'_, Message> = column![text("Lessons").size(16.0)].spacing(4);
        let current = self.session.content().slug.as_str();
        for slug in &self.page_slugs {
            let loading = self.page_loading.as_deref() == Some(slug.as_str());
            let label = if loading {
                format!("{} …", page_label(slug))
            } else {
                page_label(slug)
            };
            let entry = button(text(label))
                .width(Length::Fill)
                .style(if slug == current {
                    button::secondary
                } else {
                    button::text
                })
                .on_press_maybe((slug != current).then(|| Message::OpenPage(slug.clone())));
            pages = pages.push(entry);
        }

        container(scrollable(column![sections, pages].spacing(24)))
            .width(Length::Fixed(SIDEBAR_WIDTH_PX))
            .height(Length::Fill)
            .into()
    }

    fn lesson_content(&self) -> Element<'_, Message> {
        let content = self.session.content();
        let hero = container(
            column![
                text(content.title.as_str()).size(32.0),
                text(content.subtitle.as_str()).size(18.0),
                text(content.route()).size(12.0),
            ]
            .spacing(8),
        )
        .height(Length::Fixed(PAGE_HEADER_HEIGHT_PX))
        .width(Length::Fill);

        let section_view: Element<'_, Message> = match self.session.active_section() {
            Some(section) => self.section_view(section),
            None => Space::with_height(Length::Shrink).into(),
        };

        let document = column![hero, section_view, self.page_links()]
            .spacing(CONTENT_SPACING_PX)
            .width(Length::Fill);

        scrollable(
            container(document)
                .width(Length::Fill)
                .padding([self.config.margin_vertical, self.config.margin_horizontal]),
        )
        .on_scroll(|viewport| Message::Scrolled {
            scroll_top: viewport.absolute_offset().y,
            content_height: viewport.content_bounds().height,
            viewport_height: viewport.bounds().height,
        })
        .id(CONTENT_SCROLL_ID.clone())
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn section_view<'a>(&'a self, section: &'a SectionDescriptor) -> Element<'a, Message> {
        let id = section.id.as_str();
        let heading = format!("{} {}", section.emoji, section.title);
        let mut meta = vec![section.difficulty.to_string()];
        if !section.duration.is_empty() {
            meta.insert(0, section.duration.clone());
        }

        let bookmark_label = if self.session.is_bookmarked(id) {
            "★ Bookmarked"
        } else {
            "☆ Bookmark"
        };
        let complete_button = if self.session.is_complete(id) {
            button("✓ Completed").style(button::success)
        } else {
            button("Mark complete").on_press(Message::MarkComplete(section.id.clone()))
        };

        let actions = row![
            button(bookmark_label)
                .style(button::secondary)
                .on_press(Message::ToggleBookmark(section.id.clone())),
            complete_button,
            horizontal_space(),
            button("Previous").on_press_maybe(
                self.session
                    .previous_section()
                    .is_some()
                    .then_some(Message::PreviousSection)
            ),
            button("Next").on_press_maybe(
                self.session
                    .next_section()
                    .is_some()
                    .then_some(Message::NextSection)
            ),
        ]
        .spacing(12)
        .align_y(Vertical::Center);

        column![
            text(heading.trim_start().to_string()).size(26.0),
            text(meta.join(" · ")).size(14.0),
            text(section.body.as_str())
                .size(self.config.font_size as f32)
                .line_height(LineHeight::Relative(self.config.line_spacing)),
            actions,
        ]
        .spacing(16)
        .into()
    }

    fn page_links(&self) -> Element<'_, Message> {
        let content = self.session.content();
        let previous = content.previous_page.as_ref().map(|slug| {
            button(text(format!("← {}", page_label(slug))))
                .style(button::text)
                .on_press(Message::OpenPage(slug.clone()))
        });
        let next = content.next_page.as_ref().map(|slug| {
            button(text(format!("{} →", page_label(slug))))
                .style(button::text)
                .on_press(Message::OpenPage(slug.clone()))
        });

        let mut links: Row<'_, Message> = row![].align_y(Vertical::Center);
        if let Some(previous) = previous {
            links = links.push(previous);
        }
        links = links.push(horizontal_space());
        if let Some(next) = next {
            links = links.push(next);
        }
        links.into()
    }
}

/// "public-finance" -> "Public Finance".
fn page_label(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
