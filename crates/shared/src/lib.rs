use serde::{Deserialize, Serialize};

/// Идентификатор экземпляра оборудования (стеллажа) в сцене
pub type FixtureId = String;

/// Идентификатор секции
pub type SectionId = String;

/// Идентификатор размещённого товара
pub type ComponentId = String;

/// Идентификатор шаблона (оборудования или товара) в каталоге
pub type TemplateId = String;

fn default_version() -> u32 {
    1
}

fn default_facings() -> u32 {
    1
}

// ============================================================================
// Каталог шаблонов (только чтение, приходит от внешних CRUD-сервисов)
// ============================================================================

/// Полка: горизонтальная полоса внутри секции, описывается только высотой
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Высота полки в дюймах
    pub height: f64,
}

impl Row {
    pub fn new(height: f64) -> Self {
        Self { height }
    }
}

/// Шаблон секции: прямоугольная зона выкладки с полками
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTemplate {
    pub name: String,
    /// Ширина в дюймах
    pub width: f64,
    /// Высота в дюймах (включая шапку и отступ)
    pub height: f64,
    /// Высота шапки (header) в дюймах
    #[serde(default)]
    pub header_height: f64,
    /// Вертикальный отступ перед первой полкой
    #[serde(default)]
    pub row_offset: f64,
    /// Полки сверху вниз
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Шаблон оборудования: набор секций
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureTemplate {
    pub id: TemplateId,
    pub name: String,
    pub sections: Vec<SectionTemplate>,
}

/// Шаблон товара из каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub width: f64,
    pub height: f64,
    /// Глубина не участвует в 2D-раскладке
    #[serde(default)]
    pub depth: f64,
}

/// Библиотека шаблонов оборудования и товаров
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub fixtures: Vec<FixtureTemplate>,
    #[serde(default)]
    pub products: Vec<ProductTemplate>,
}

impl Catalog {
    pub fn fixture(&self, id: &str) -> Option<&FixtureTemplate> {
        self.fixtures.iter().find(|f| f.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&ProductTemplate> {
        self.products.iter().find(|p| p.id == id)
    }
}

// ============================================================================
// Сцена (планограмма)
// ============================================================================

/// Товар, размещённый в секции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedComponent {
    pub id: ComponentId,
    /// Шаблон товара, из которого создан компонент
    pub product_id: TemplateId,
    pub name: String,
    /// Размеры в дюймах (одна фейсинга)
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub depth: f64,
    /// Количество фейсингов (≥ 1), умножает эффективную ширину
    #[serde(default = "default_facings")]
    pub facings: u32,
    /// Позиция в пикселях относительно начала контентной области секции
    pub x: f64,
    pub y: f64,
    /// Кэш: на какой полке стоит товар (пересчитывается при каждой привязке)
    #[serde(default)]
    pub row_index: usize,
}

impl PlacedComponent {
    /// Эффективная ширина в дюймах с учётом фейсингов
    pub fn effective_width(&self) -> f64 {
        self.width * self.facings as f64
    }
}

/// Секция экземпляра оборудования: владеет списком размещённых товаров
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    /// Оборудование, которому принадлежит секция
    pub fixture_id: FixtureId,
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub header_height: f64,
    #[serde(default)]
    pub row_offset: f64,
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Размещённые товары в порядке добавления
    #[serde(default)]
    pub components: Vec<PlacedComponent>,
}

impl Section {
    /// Создать пустую секцию из шаблона
    pub fn from_template(id: SectionId, fixture_id: FixtureId, template: &SectionTemplate) -> Self {
        Self {
            id,
            fixture_id,
            name: template.name.clone(),
            width: template.width,
            height: template.height,
            header_height: template.header_height,
            row_offset: template.row_offset,
            rows: template.rows.clone(),
            components: Vec::new(),
        }
    }

    /// Высота контентной области в дюймах (без шапки и отступа)
    pub fn content_height(&self) -> f64 {
        self.height - self.header_height - self.row_offset
    }

    /// Смещение начала контентной области от верхнего края секции (дюймы)
    pub fn content_offset(&self) -> f64 {
        self.header_height + self.row_offset
    }

    pub fn component(&self, id: &str) -> Option<&PlacedComponent> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn component_mut(&mut self, id: &str) -> Option<&mut PlacedComponent> {
        self.components.iter_mut().find(|c| c.id == id)
    }
}

/// Узел сцены: экземпляр оборудования на холсте
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureInstance {
    pub id: FixtureId,
    /// Шаблон, из которого скопирован экземпляр
    pub template_id: TemplateId,
    pub name: String,
    /// Позиция узла на холсте (пиксели)
    #[serde(default)]
    pub position: [f64; 2],
    /// Секции экземпляра по порядку (ссылки в таблицу `sections`)
    pub sections: Vec<SectionId>,
}

/// Ребро между двумя узлами сцены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEdge {
    pub id: String,
    pub source: FixtureId,
    pub target: FixtureId,
}

/// Описание сцены: узлы, рёбра и плоская таблица секций
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanogramScene {
    /// Версия формата
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub fixtures: Vec<FixtureInstance>,
    #[serde(default)]
    pub edges: Vec<SceneEdge>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Default for PlanogramScene {
    fn default() -> Self {
        Self {
            version: 1,
            fixtures: Vec::new(),
            edges: Vec::new(),
            sections: Vec::new(),
        }
    }
}

impl PlanogramScene {
    pub fn fixture(&self, id: &str) -> Option<&FixtureInstance> {
        self.fixtures.iter().find(|f| f.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Общее количество размещённых товаров во всех секциях
    pub fn component_count(&self) -> usize {
        self.sections.iter().map(|s| s.components.len()).sum()
    }
}
